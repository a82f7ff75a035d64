//! Configuration for SFTS
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, SftsError};
use crate::protocol::MAX_FIELD_LEN;

/// Commands advertised in a HELP response
pub const DEFAULT_HELP_TEXT: &str = "get, put, change, help, bye";

/// Main configuration for an SFTS server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory that PUT, GET and CHANGE operate in.
    /// Every filename is resolved directly inside it.
    pub root_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Text sent back for HELP (must fit the 5-bit length field)
    pub help_text: String,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Connection read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            help_text: DEFAULT_HELP_TEXT.to_string(),
            listen_addr: "0.0.0.0:7000".to_string(),
            max_connections: 16,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values a server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.help_text.len() > MAX_FIELD_LEN {
            return Err(SftsError::Config(format!(
                "help text is {} bytes, the length field holds at most {}",
                self.help_text.len(),
                MAX_FIELD_LEN
            )));
        }
        if self.max_connections == 0 {
            return Err(SftsError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage root directory
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the HELP response text
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.config.help_text = text.into();
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
