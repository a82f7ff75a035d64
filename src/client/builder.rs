//! Request builder
//!
//! Produces the encoded request frame for each command. Only PUT touches
//! the file store; the rest are pure encodings of already-validated input.

use crate::error::Result;
use crate::protocol::{encode_bare, encode_change, encode_get, encode_put, Filename, Frame, Opcode};
use crate::storage::FileStore;

use super::Command;

/// Read a local file and encode it as a PUT request
///
/// Fails without side effects when the file cannot be read or is too large
/// for the size field.
pub fn build_put<S: FileStore + ?Sized>(store: &S, filename: &Filename) -> Result<Frame> {
    let data = store.read_file(filename.as_str())?;
    let frame = encode_put(filename, &data)?;

    tracing::debug!(
        header = %frame.header(),
        filename = %filename,
        size = data.len(),
        "PUT request built"
    );

    Ok(frame)
}

/// Encode a GET request
pub fn build_get(filename: &Filename) -> Frame {
    let frame = encode_get(filename);
    tracing::debug!(header = %frame.header(), filename = %filename, "GET request built");
    frame
}

/// Encode a CHANGE request
pub fn build_change(old_name: &Filename, new_name: &Filename) -> Frame {
    let frame = encode_change(old_name, new_name);
    tracing::debug!(
        header = %frame.header(),
        old_name = %old_name,
        new_name = %new_name,
        new_len = new_name.field_len(),
        "CHANGE request built"
    );
    frame
}

/// Encode a HELP request
pub fn build_help() -> Frame {
    encode_bare(Opcode::Help)
}

/// Encode a BYE request
pub fn build_bye() -> Frame {
    encode_bare(Opcode::Bye)
}

/// Build the frame for any command
pub fn build_request<S: FileStore + ?Sized>(store: &S, command: &Command) -> Result<Frame> {
    match command {
        Command::Put(filename) => build_put(store, filename),
        Command::Get(filename) => Ok(build_get(filename)),
        Command::Change { old_name, new_name } => Ok(build_change(old_name, new_name)),
        Command::Help => Ok(build_help()),
        Command::Bye => Ok(build_bye()),
    }
}
