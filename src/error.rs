//! Error types for SFTS
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SftsError
pub type Result<T> = std::result::Result<T, SftsError>;

/// Unified error type for SFTS operations
#[derive(Debug, Error)]
pub enum SftsError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("{field} out of range: {value} (max {max})")]
    FieldOverflow {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("File too big, size = 0x{size:x}")]
    FileTooLarge { size: u64 },

    // -------------------------------------------------------------------------
    // Filename Errors
    // -------------------------------------------------------------------------
    #[error("Filename must not exceed {max} bytes (got {len})")]
    FilenameTooLong { len: usize, max: usize },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    // -------------------------------------------------------------------------
    // Command-line / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SftsError {
    /// True when the error means the peer went away rather than misbehaved
    pub fn is_disconnect(&self) -> bool {
        match self {
            SftsError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }

    /// True when a blocking read or write gave up on its timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            // Windows reports TimedOut where Unix reports WouldBlock
            SftsError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}
