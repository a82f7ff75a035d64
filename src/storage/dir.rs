//! Directory-backed file store
//!
//! Stores each file directly inside a root directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use parking_lot::RwLock;

use crate::error::{Result, SftsError};

use super::FileStore;

/// File store rooted at a directory
///
/// ## Concurrency:
/// - `namespace`: reads share the lock, writes and renames take it
///   exclusively, so each operation is atomic with respect to other
///   connections. Ordering between connections is last-writer-wins.
pub struct DirStore {
    /// Directory every name is resolved in
    root: PathBuf,

    /// Serializes mutations of the directory
    namespace: RwLock<()>,
}

impl DirStore {
    /// Open a store, creating the root directory if it doesn't exist
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;

        Ok(Self {
            root: root.to_path_buf(),
            namespace: RwLock::new(()),
        })
    }

    /// Get the root directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a name to a path inside the root
    ///
    /// Only a single normal path component is accepted: no separators,
    /// no `.`/`..`, nothing absolute.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name => Ok(self.root.join(part)),
            _ => Err(SftsError::InvalidPath(name.to_string())),
        }
    }
}

/// Turn a missing-file I/O error into `FileNotFound`
fn not_found_as(name: &str, err: std::io::Error) -> SftsError {
    if err.kind() == ErrorKind::NotFound {
        SftsError::FileNotFound(name.to_string())
    } else {
        SftsError::Io(err)
    }
}

impl FileStore for DirStore {
    fn read_file(&self, name: &str) -> Result<Bytes> {
        let path = self.resolve(name)?;

        let _guard = self.namespace.read();
        let data = fs::read(&path).map_err(|e| not_found_as(name, e))?;

        Ok(Bytes::from(data))
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;

        let _guard = self.namespace.write();
        fs::write(&path, data)?;

        Ok(())
    }

    fn rename_file(&self, old: &str, new: &str) -> Result<()> {
        let old_path = self.resolve(old)?;
        let new_path = self.resolve(new)?;

        let _guard = self.namespace.write();
        fs::rename(&old_path, &new_path).map_err(|e| not_found_as(old, e))?;

        Ok(())
    }
}
