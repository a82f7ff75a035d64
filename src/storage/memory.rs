//! In-memory file store
//!
//! HashMap-based store with RwLock for concurrency.

use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::error::{Result, SftsError};

use super::FileStore;

/// File store that keeps everything in memory
#[derive(Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a file exists
    pub fn contains(&self, name: &str) -> bool {
        self.files.read().contains_key(name)
    }

    /// Get the number of stored files
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl FileStore for MemoryStore {
    fn read_file(&self, name: &str) -> Result<Bytes> {
        self.files
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SftsError::FileNotFound(name.to_string()))
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        self.files
            .write()
            .insert(name.to_string(), Bytes::copy_from_slice(data));
        Ok(())
    }

    fn rename_file(&self, old: &str, new: &str) -> Result<()> {
        let mut files = self.files.write();
        let data = files
            .remove(old)
            .ok_or_else(|| SftsError::FileNotFound(old.to_string()))?;
        files.insert(new.to_string(), data);
        Ok(())
    }
}
