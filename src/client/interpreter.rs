//! Response interpreter
//!
//! Reads whatever follows a response header and turns it into an
//! [`Outcome`]. OK replies carry no payload, so the command that was sent
//! is passed in to say what succeeded.

use std::fmt;
use std::io::Read;

use crate::error::{Result, SftsError};
use crate::protocol::{read_response_body, Filename, Header, Response};
use crate::storage::FileStore;

use super::Command;

/// What a single request/response exchange amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// PUT acknowledged
    Uploaded { filename: Filename },

    /// CHANGE acknowledged
    Renamed { old_name: Filename, new_name: Filename },

    /// OK for a command that does not expect one
    Completed,

    /// GET payload received and saved under the server-supplied name
    Downloaded { filename: Filename, size: usize },

    /// GET payload received but could not be saved locally
    SaveFailed {
        filename: Option<String>,
        reason: String,
    },

    /// Server could not find the requested file
    NotFound,

    /// Server did not recognize the request
    UnknownRequest,

    /// PUT or CHANGE failed on the server
    CommandFailed,

    /// Commands the server supports
    Help { text: String },

    /// Response code the protocol does not define
    Ignored { code: u8 },
}

impl Outcome {
    /// True when the server carried out the command and, for GET, the file
    /// was saved
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Uploaded { .. }
                | Outcome::Renamed { .. }
                | Outcome::Completed
                | Outcome::Downloaded { .. }
                | Outcome::Help { .. }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Uploaded { filename } => {
                write!(f, "{} has been uploaded successfully.", filename)
            }
            Outcome::Renamed { old_name, new_name } => write!(
                f,
                "{} has been renamed to {} successfully.",
                old_name, new_name
            ),
            Outcome::Completed => f.write_str("Command completed successfully."),
            Outcome::Downloaded { filename, .. } => {
                write!(f, "{} has been downloaded successfully.", filename)
            }
            Outcome::SaveFailed {
                filename: Some(name),
                reason,
            } => write!(f, "ERROR: Could not save download file \"{}\": {}", name, reason),
            Outcome::SaveFailed {
                filename: None,
                reason,
            } => write!(f, "ERROR: Could not save download file: {}", reason),
            Outcome::NotFound => f.write_str("SERVER ERROR: File not found..."),
            Outcome::UnknownRequest => f.write_str(
                "SERVER ERROR: Unknown request... Try 'help' to see commands supported by server.",
            ),
            Outcome::CommandFailed => f.write_str("SERVER ERROR: Command was unsuccessful..."),
            Outcome::Help { text } => write!(f, "Commands are: {}", text),
            Outcome::Ignored { code } => {
                write!(f, "Unrecognized response code 0b{:03b}, ignored.", code)
            }
        }
    }
}

/// Interpret a response
///
/// `header` has already been read from `reader`; any payload it announces
/// is read here. A GET payload is written to `store` under the filename
/// the server sent back.
pub fn interpret<R, S>(header: Header, reader: &mut R, sent: &Command, store: &S) -> Result<Outcome>
where
    R: Read,
    S: FileStore + ?Sized,
{
    tracing::debug!(header = %header, "response header");

    let response = match read_response_body(header, reader) {
        Ok(response) => response,
        // The body was consumed in full; only the name was unusable
        Err(SftsError::InvalidFilename(reason)) => {
            return Ok(Outcome::SaveFailed {
                filename: None,
                reason,
            });
        }
        Err(e) => return Err(e),
    };

    let outcome = match response {
        Response::Ok => match sent {
            Command::Put(filename) => Outcome::Uploaded {
                filename: filename.clone(),
            },
            Command::Change { old_name, new_name } => Outcome::Renamed {
                old_name: old_name.clone(),
                new_name: new_name.clone(),
            },
            _ => Outcome::Completed,
        },
        Response::GetOk { filename, data } => {
            tracing::debug!(filename = %filename, size = data.len(), "GET payload received");
            match store.write_file(filename.as_str(), &data) {
                Ok(()) => Outcome::Downloaded {
                    filename,
                    size: data.len(),
                },
                Err(e) => Outcome::SaveFailed {
                    filename: Some(filename.to_string()),
                    reason: e.to_string(),
                },
            }
        }
        Response::NotFound => Outcome::NotFound,
        Response::UnknownRequest => Outcome::UnknownRequest,
        Response::Failed => Outcome::CommandFailed,
        Response::Help { text } => Outcome::Help { text },
        Response::Unrecognized { code } => {
            tracing::warn!("Ignoring response with undefined code 0b{:03b}", code);
            Outcome::Ignored { code }
        }
    };

    Ok(outcome)
}
