//! Tests for the file stores
//!
//! These tests verify:
//! - Whole-file read/write/rename on DirStore and MemoryStore
//! - Overwrite semantics
//! - Missing files reported as FileNotFound
//! - DirStore never resolves a name outside its root
//! - Concurrent writers

use std::fs;
use std::sync::Arc;
use std::thread;

use sfts::storage::{DirStore, FileStore, MemoryStore};
use sfts::SftsError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_dir_store() -> (TempDir, DirStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = DirStore::open(temp_dir.path()).unwrap();
    (temp_dir, store)
}

// =============================================================================
// DirStore Tests
// =============================================================================

#[test]
fn test_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("served");

    assert!(!root.exists());

    let store = DirStore::open(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_dir_write_read() {
    let (temp, store) = setup_dir_store();

    store.write_file("hello.txt", b"world").unwrap();

    assert_eq!(store.read_file("hello.txt").unwrap().as_ref(), b"world");
    assert_eq!(fs::read(temp.path().join("hello.txt")).unwrap(), b"world");
}

#[test]
fn test_dir_write_overwrites() {
    let (_temp, store) = setup_dir_store();

    store.write_file("f", b"a much longer first version").unwrap();
    store.write_file("f", b"short").unwrap();

    assert_eq!(store.read_file("f").unwrap().as_ref(), b"short");
}

#[test]
fn test_dir_empty_file() {
    let (_temp, store) = setup_dir_store();

    store.write_file("empty", b"").unwrap();

    assert!(store.read_file("empty").unwrap().is_empty());
}

#[test]
fn test_dir_read_missing() {
    let (_temp, store) = setup_dir_store();

    let result = store.read_file("missing.txt");

    assert!(matches!(result, Err(SftsError::FileNotFound(ref n)) if n == "missing.txt"));
}

#[test]
fn test_dir_rename() {
    let (temp, store) = setup_dir_store();
    store.write_file("a.txt", b"content").unwrap();

    store.rename_file("a.txt", "b.txt").unwrap();

    assert!(!temp.path().join("a.txt").exists());
    assert_eq!(store.read_file("b.txt").unwrap().as_ref(), b"content");
    assert!(matches!(store.read_file("a.txt"), Err(SftsError::FileNotFound(_))));
}

#[test]
fn test_dir_rename_missing() {
    let (_temp, store) = setup_dir_store();

    let result = store.rename_file("nope.txt", "other.txt");

    assert!(matches!(result, Err(SftsError::FileNotFound(ref n)) if n == "nope.txt"));
}

#[test]
fn test_dir_rejects_names_outside_root() {
    let (temp, store) = setup_dir_store();
    store.write_file("inside", b"x").unwrap();

    for name in ["../escape", "sub/file", "/etc/passwd", ".", "..", "", "a/../b"] {
        assert!(
            matches!(store.write_file(name, b"x"), Err(SftsError::InvalidPath(_))),
            "write accepted {:?}",
            name
        );
        assert!(
            matches!(store.read_file(name), Err(SftsError::InvalidPath(_))),
            "read accepted {:?}",
            name
        );
        assert!(
            matches!(store.rename_file("inside", name), Err(SftsError::InvalidPath(_))),
            "rename accepted {:?}",
            name
        );
    }

    assert!(!temp.path().parent().unwrap().join("escape").exists());
    assert_eq!(store.read_file("inside").unwrap().as_ref(), b"x");
}

#[test]
fn test_dir_concurrent_writers() {
    let (_temp, store) = setup_dir_store();
    let store = Arc::new(store);

    thread::scope(|scope| {
        for i in 0..8u8 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                let payload = vec![i; 4096];
                for _ in 0..10 {
                    store.write_file("shared.bin", &payload).unwrap();
                    store.write_file(&format!("own_{}.bin", i), &payload).unwrap();
                }
            });
        }
    });

    // Last writer wins, but the file is always one writer's complete payload
    let shared = store.read_file("shared.bin").unwrap();
    assert_eq!(shared.len(), 4096);
    assert!(shared.iter().all(|&b| b == shared[0]));

    for i in 0..8u8 {
        let own = store.read_file(&format!("own_{}.bin", i)).unwrap();
        assert_eq!(own.as_ref(), vec![i; 4096].as_slice());
    }
}

// =============================================================================
// MemoryStore Tests
// =============================================================================

#[test]
fn test_memory_write_read_rename() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    store.write_file("a.txt", b"one").unwrap();
    store.write_file("a.txt", b"two").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.read_file("a.txt").unwrap().as_ref(), b"two");

    store.rename_file("a.txt", "b.txt").unwrap();
    assert!(!store.contains("a.txt"));
    assert!(store.contains("b.txt"));
}

#[test]
fn test_memory_missing() {
    let store = MemoryStore::new();

    assert!(matches!(store.read_file("x"), Err(SftsError::FileNotFound(_))));
    assert!(matches!(store.rename_file("x", "y"), Err(SftsError::FileNotFound(_))));
    assert!(store.is_empty());
}

#[test]
fn test_shared_store_through_arc() {
    let store = Arc::new(MemoryStore::new());
    let handle: Arc<MemoryStore> = Arc::clone(&store);

    // Arc<T> is itself a FileStore
    fn put_via<S: FileStore>(s: &S) {
        s.write_file("via_arc", b"ok").unwrap();
    }
    put_via(&handle);

    assert!(store.contains("via_arc"));
}
