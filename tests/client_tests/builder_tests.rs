//! Request Builder Tests
//!
//! Tests for turning commands into request frames.

use sfts::client::{
    build_bye, build_change, build_get, build_help, build_put, build_request, Command,
};
use sfts::protocol::{encode_put, Filename};
use sfts::storage::{FileStore, MemoryStore};
use sfts::SftsError;

fn name(s: &str) -> Filename {
    Filename::new(s).unwrap()
}

// =============================================================================
// PUT
// =============================================================================

#[test]
fn test_build_put_reads_store() {
    let store = MemoryStore::new();
    store.write_file("notes.txt", b"some notes").unwrap();

    let frame = build_put(&store, &name("notes.txt")).unwrap();

    assert_eq!(frame, encode_put(&name("notes.txt"), b"some notes").unwrap());
    assert_eq!(frame.header().length(), 9);
}

#[test]
fn test_build_put_missing_file() {
    let store = MemoryStore::new();

    let result = build_put(&store, &name("absent.txt"));

    assert!(matches!(result, Err(SftsError::FileNotFound(_))));
}

#[test]
fn test_build_put_empty_file() {
    let store = MemoryStore::new();
    store.write_file("zero", b"").unwrap();

    let bytes = build_put(&store, &name("zero")).unwrap().to_bytes();

    assert_eq!(bytes.as_ref(), &[0x04, b'z', b'e', b'r', b'o', 0, 0, 0, 0]);
}

// =============================================================================
// Pure Builders
// =============================================================================

#[test]
fn test_build_get() {
    let bytes = build_get(&name("x.bin")).to_bytes();
    assert_eq!(bytes.as_ref(), b"\x25x.bin");
}

#[test]
fn test_build_change() {
    let bytes = build_change(&name("a"), &name("bc")).to_bytes();
    assert_eq!(bytes.as_ref(), &[0x41, b'a', 0x02, b'b', b'c']);
}

#[test]
fn test_build_help_bye() {
    assert_eq!(build_help().to_bytes().as_ref(), &[0x60]);
    assert_eq!(build_bye().to_bytes().as_ref(), &[0x80]);
    assert!(build_help().payload().is_empty());
}

// =============================================================================
// Routing
// =============================================================================

#[test]
fn test_build_request_routes_commands() {
    let store = MemoryStore::new();
    store.write_file("up", b"data").unwrap();

    let put = build_request(&store, &Command::Put(name("up"))).unwrap();
    assert_eq!(put.header().code(), 0b000);

    let get = build_request(&store, &Command::Get(name("down"))).unwrap();
    assert_eq!(get, build_get(&name("down")));

    let change = build_request(
        &store,
        &Command::Change {
            old_name: name("a"),
            new_name: name("b"),
        },
    )
    .unwrap();
    assert_eq!(change, build_change(&name("a"), &name("b")));

    assert_eq!(build_request(&store, &Command::Help).unwrap(), build_help());
    assert_eq!(build_request(&store, &Command::Bye).unwrap(), build_bye());
}

#[test]
fn test_build_request_put_failure_is_local() {
    let store = MemoryStore::new();

    let result = build_request(&store, &Command::Put(name("ghost")));

    assert!(result.is_err());
    assert!(store.is_empty());
}
