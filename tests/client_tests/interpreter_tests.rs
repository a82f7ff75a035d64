//! Response Interpreter Tests
//!
//! Tests for turning server replies into outcomes.

use std::io::Cursor;

use sfts::client::{interpret, Command, Outcome};
use sfts::protocol::{encode_get_ok, encode_help, read_header, Filename};
use sfts::storage::{DirStore, FileStore, MemoryStore};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn name(s: &str) -> Filename {
    Filename::new(s).unwrap()
}

/// Interpret `bytes` as a complete response; returns the outcome and how
/// many bytes were consumed
fn run<S: FileStore>(bytes: &[u8], sent: &Command, store: &S) -> (Outcome, u64) {
    let mut cursor = Cursor::new(bytes);
    let header = read_header(&mut cursor).unwrap();
    let outcome = interpret(header, &mut cursor, sent, store).unwrap();
    (outcome, cursor.position())
}

// =============================================================================
// OK Responses
// =============================================================================

#[test]
fn test_ok_after_put() {
    let store = MemoryStore::new();
    let (outcome, _) = run(&[0x00], &Command::Put(name("up.txt")), &store);

    assert_eq!(outcome, Outcome::Uploaded { filename: name("up.txt") });
    assert_eq!(outcome.to_string(), "up.txt has been uploaded successfully.");
    assert!(outcome.is_success());
}

#[test]
fn test_ok_after_change() {
    let store = MemoryStore::new();
    let sent = Command::Change {
        old_name: name("a.txt"),
        new_name: name("b.txt"),
    };
    let (outcome, _) = run(&[0x00], &sent, &store);

    assert_eq!(
        outcome.to_string(),
        "a.txt has been renamed to b.txt successfully."
    );
}

#[test]
fn test_ok_after_other_command() {
    let store = MemoryStore::new();
    let (outcome, _) = run(&[0x00], &Command::Help, &store);

    assert_eq!(outcome, Outcome::Completed);
}

// =============================================================================
// GET Responses
// =============================================================================

#[test]
fn test_get_ok_saves_under_server_name() {
    let store = MemoryStore::new();
    let frame = encode_get_ok(&name("server.txt"), b"from server").unwrap();

    let (outcome, consumed) = run(&frame.to_bytes(), &Command::Get(name("asked.txt")), &store);

    assert_eq!(
        outcome,
        Outcome::Downloaded {
            filename: name("server.txt"),
            size: 11
        }
    );
    assert_eq!(consumed as usize, frame.wire_len());
    assert_eq!(store.read_file("server.txt").unwrap().as_ref(), b"from server");
    assert!(!store.contains("asked.txt"));
}

#[test]
fn test_get_ok_overwrites_local_file() {
    let store = MemoryStore::new();
    store.write_file("f", b"old local copy").unwrap();
    let frame = encode_get_ok(&name("f"), b"new").unwrap();

    run(&frame.to_bytes(), &Command::Get(name("f")), &store);

    assert_eq!(store.read_file("f").unwrap().as_ref(), b"new");
}

#[test]
fn test_get_ok_save_failure() {
    let temp = TempDir::new().unwrap();
    let store = DirStore::open(temp.path()).unwrap();
    // A name the local store refuses to resolve
    let frame = encode_get_ok(&name("../escape.txt"), b"payload").unwrap();

    let (outcome, consumed) = run(&frame.to_bytes(), &Command::Get(name("x")), &store);

    match &outcome {
        Outcome::SaveFailed { filename, .. } => {
            assert_eq!(filename.as_deref(), Some("../escape.txt"));
        }
        other => panic!("Expected SaveFailed, got {:?}", other),
    }
    assert!(!outcome.is_success());
    assert!(outcome.to_string().starts_with("ERROR: Could not save download file"));
    assert_eq!(consumed as usize, frame.wire_len());
    assert!(!temp.path().parent().unwrap().join("escape.txt").exists());
}

#[test]
fn test_get_ok_with_invalid_name_is_consumed() {
    let store = MemoryStore::new();
    // name bytes are not UTF-8
    let bytes = [0x22, 0xFF, 0xFE, 0x00, 0x00, 0x00, 0x01, b'z'];

    let (outcome, consumed) = run(&bytes, &Command::Get(name("x")), &store);

    assert!(matches!(outcome, Outcome::SaveFailed { filename: None, .. }));
    assert_eq!(consumed as usize, bytes.len());
    assert!(store.is_empty());
}

#[test]
fn test_get_not_found() {
    let store = MemoryStore::new();
    let (outcome, consumed) = run(&[0x40, 0xAA], &Command::Get(name("missing.txt")), &store);

    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(outcome.to_string(), "SERVER ERROR: File not found...");
    assert_eq!(consumed, 1);
}

// =============================================================================
// Error and HELP Responses
// =============================================================================

#[test]
fn test_unknown_request_and_failure() {
    let store = MemoryStore::new();

    let (outcome, _) = run(&[0x60], &Command::Help, &store);
    assert_eq!(outcome, Outcome::UnknownRequest);
    assert!(outcome.to_string().contains("Try 'help'"));

    let (outcome, _) = run(&[0xA0], &Command::Put(name("p")), &store);
    assert_eq!(outcome, Outcome::CommandFailed);
    assert_eq!(outcome.to_string(), "SERVER ERROR: Command was unsuccessful...");
}

#[test]
fn test_help_text() {
    let store = MemoryStore::new();
    let frame = encode_help("get, put").unwrap();

    let (outcome, _) = run(&frame.to_bytes(), &Command::Help, &store);

    assert_eq!(outcome.to_string(), "Commands are: get, put");
}

#[test]
fn test_undefined_codes_are_ignored() {
    let store = MemoryStore::new();

    for byte in [0x80u8, 0xE5] {
        let (outcome, consumed) = run(&[byte, 1, 2, 3], &Command::Help, &store);
        assert_eq!(outcome, Outcome::Ignored { code: byte >> 5 });
        assert_eq!(consumed, 1);
    }
}
