//! Command Tests
//!
//! Tests for parsing and validating interactive commands.

use sfts::client::{parse_command, Command};
use sfts::protocol::{Filename, Opcode};
use sfts::SftsError;

fn name(s: &str) -> Filename {
    Filename::new(s).unwrap()
}

fn usage_message(line: &str) -> String {
    match parse_command(line) {
        Err(SftsError::Usage(message)) => message,
        other => panic!("Expected usage error for {:?}, got {:?}", line, other),
    }
}

// =============================================================================
// Accepted Commands
// =============================================================================

#[test]
fn test_parse_put_get() {
    assert_eq!(parse_command("put a.txt").unwrap(), Command::Put(name("a.txt")));
    assert_eq!(parse_command("get a.txt").unwrap(), Command::Get(name("a.txt")));
}

#[test]
fn test_parse_change() {
    assert_eq!(
        parse_command("change old.txt new.txt").unwrap(),
        Command::Change {
            old_name: name("old.txt"),
            new_name: name("new.txt"),
        }
    );
}

#[test]
fn test_parse_help_bye() {
    assert_eq!(parse_command("help").unwrap(), Command::Help);
    assert_eq!(parse_command("bye").unwrap(), Command::Bye);
}

#[test]
fn test_parse_tolerates_extra_whitespace() {
    assert_eq!(
        parse_command("  get   spaced.txt \n").unwrap(),
        Command::Get(name("spaced.txt"))
    );
}

#[test]
fn test_parse_max_length_filename() {
    let long = "f".repeat(30);
    assert_eq!(
        parse_command(&format!("put {}", long)).unwrap(),
        Command::Put(name(&long))
    );
}

#[test]
fn test_command_opcodes() {
    assert_eq!(Command::Put(name("a")).opcode(), Opcode::Put);
    assert_eq!(Command::Get(name("a")).opcode(), Opcode::Get);
    assert_eq!(
        Command::Change {
            old_name: name("a"),
            new_name: name("b")
        }
        .opcode(),
        Opcode::Change
    );
    assert_eq!(Command::Help.opcode(), Opcode::Help);
    assert_eq!(Command::Bye.opcode(), Opcode::Bye);
}

// =============================================================================
// Rejected Commands
// =============================================================================

#[test]
fn test_reject_wrong_argument_counts() {
    assert!(usage_message("put").contains("1 argument"));
    assert!(usage_message("get a b").contains("1 argument"));
    assert!(usage_message("change a").contains("2 arguments"));
    assert!(usage_message("change a b c").contains("2 arguments"));
    assert!(usage_message("help me").contains("no arguments"));
    assert!(usage_message("bye now").contains("no arguments"));
}

#[test]
fn test_reject_long_filename() {
    let long = "f".repeat(31);

    assert!(usage_message(&format!("put {}", long)).contains("must not exceed 30"));
    assert!(usage_message(&format!("get {}", long)).contains("must not exceed 30"));
    assert!(usage_message(&format!("change ok.txt {}", long)).contains("filenames"));
    assert!(usage_message(&format!("change {} ok.txt", long)).contains("filenames"));
}

#[test]
fn test_reject_unknown_command() {
    let message = usage_message("ls -la");
    assert!(message.contains("'ls'"));
    assert!(message.contains("help"));

    // Commands are case-sensitive
    assert!(usage_message("PUT a.txt").contains("Unknown command"));
}

#[test]
fn test_reject_empty_line() {
    usage_message("");
    usage_message("   ");
}
