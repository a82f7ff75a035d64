//! Storage Module
//!
//! The file store that PUT, GET and CHANGE operate on.
//!
//! ## Responsibilities
//! - Read a whole file by name
//! - Write a whole file by name, replacing any existing file
//! - Rename a file
//!
//! File contents are opaque bytes; nothing in the protocol looks inside
//! them. Names are flat: a store never resolves a name outside its own
//! namespace.

mod dir;
mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;

/// Whole-file read/write/rename capability
///
/// Implementations are shared between connection threads, so every method
/// takes `&self` and must be safe to call concurrently.
pub trait FileStore: Send + Sync {
    /// Read a file. `SftsError::FileNotFound` when it does not exist.
    fn read_file(&self, name: &str) -> Result<Bytes>;

    /// Create or overwrite a file
    fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Rename a file. `SftsError::FileNotFound` when `old` does not exist.
    fn rename_file(&self, old: &str, new: &str) -> Result<()>;
}

impl<T: FileStore + ?Sized> FileStore for Arc<T> {
    fn read_file(&self, name: &str) -> Result<Bytes> {
        (**self).read_file(name)
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        (**self).write_file(name, data)
    }

    fn rename_file(&self, old: &str, new: &str) -> Result<()> {
        (**self).rename_file(old, new)
    }
}
