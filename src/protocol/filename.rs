//! Validated filenames
//!
//! Filenames travel in a length5 field, which holds up to 31 bytes. One
//! byte is kept back for a terminator on peers that store names as C
//! strings, so names are limited to 30 bytes.

use std::fmt;

use crate::error::{Result, SftsError};

/// Longest filename accepted anywhere in the protocol
pub const MAX_FILENAME_LEN: usize = 30;

/// A non-empty UTF-8 filename of at most `MAX_FILENAME_LEN` bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filename(String);

impl Filename {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SftsError::InvalidFilename("empty filename".to_string()));
        }
        if name.len() > MAX_FILENAME_LEN {
            return Err(SftsError::FilenameTooLong {
                len: name.len(),
                max: MAX_FILENAME_LEN,
            });
        }
        Ok(Self(name))
    }

    /// Validate raw bytes read off the wire
    ///
    /// Every rejection is reported as `InvalidFilename`, including names
    /// that are too long, so decoders can treat them uniformly.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let name = String::from_utf8(bytes)
            .map_err(|e| SftsError::InvalidFilename(format!("not UTF-8: {}", e)))?;
        Self::new(name).map_err(|e| match e {
            SftsError::InvalidFilename(reason) => SftsError::InvalidFilename(reason),
            other => SftsError::InvalidFilename(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes, as written into a length field
    pub fn field_len(&self) -> u8 {
        // bounded by MAX_FILENAME_LEN at construction
        self.0.len() as u8
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
