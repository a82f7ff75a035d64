//! Command definitions
//!
//! Parses and validates the interactive line commands. Everything here runs
//! before any network activity; a rejected line never reaches the wire.

use crate::error::{Result, SftsError};
use crate::protocol::{Filename, Opcode, MAX_FILENAME_LEN};

/// A validated operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload a local file
    Put(Filename),

    /// Download a remote file
    Get(Filename),

    /// Rename a remote file
    Change { old_name: Filename, new_name: Filename },

    /// List the commands the server supports
    Help,

    /// Close the session
    Bye,
}

impl Command {
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Put(_) => Opcode::Put,
            Command::Get(_) => Opcode::Get,
            Command::Change { .. } => Opcode::Change,
            Command::Help => Opcode::Help,
            Command::Bye => Opcode::Bye,
        }
    }
}

/// Parse one input line
///
/// Arguments are separated by whitespace, so filenames cannot contain
/// spaces.
pub fn parse_command(line: &str) -> Result<Command> {
    let args: Vec<&str> = line.split_whitespace().collect();

    let Some((&name, rest)) = args.split_first() else {
        return Err(SftsError::Usage("No command entered".to_string()));
    };

    match name {
        "help" | "bye" => {
            if !rest.is_empty() {
                return Err(SftsError::Usage(format!(
                    "Command takes no arguments, ex: '{}'",
                    name
                )));
            }
            Ok(if name == "help" { Command::Help } else { Command::Bye })
        }
        "put" | "get" => {
            let [file] = rest else {
                return Err(SftsError::Usage(format!(
                    "Command takes 1 argument, ex: '{} example.txt'",
                    name
                )));
            };
            let filename = filename_arg(file, "filename")?;
            Ok(if name == "put" {
                Command::Put(filename)
            } else {
                Command::Get(filename)
            })
        }
        "change" => {
            let [old_name, new_name] = rest else {
                return Err(SftsError::Usage(
                    "Command takes 2 arguments, ex: 'change oldName.txt newName.txt'".to_string(),
                ));
            };
            Ok(Command::Change {
                old_name: filename_arg(old_name, "filenames")?,
                new_name: filename_arg(new_name, "filenames")?,
            })
        }
        other => Err(SftsError::Usage(format!(
            "Unknown command '{}'. Try 'help' to see commands supported by server.",
            other
        ))),
    }
}

fn filename_arg(arg: &str, what: &str) -> Result<Filename> {
    Filename::new(arg).map_err(|e| match e {
        SftsError::FilenameTooLong { .. } => SftsError::Usage(format!(
            "Command {} must not exceed {} characters.",
            what, MAX_FILENAME_LEN
        )),
        other => other,
    })
}
