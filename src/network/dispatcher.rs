//! Request Dispatcher
//!
//! Reads the body a request header calls for, performs the file operation,
//! and produces the response frame.

use std::io::Read;

use crate::error::{Result, SftsError};
use crate::protocol::{
    encode_get_ok, encode_help, encode_status, read_request_body, Filename, Frame, Header,
    Opcode, Request, ResponseCode,
};
use crate::storage::FileStore;

/// What the connection loop should do after a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Write this frame and wait for the next request
    Reply(Frame),

    /// BYE: close without replying
    Close,
}

/// Server-side request handling, shared by all connections
pub struct Dispatcher<S: FileStore> {
    /// File store all requests operate on
    store: S,

    /// Pre-encoded HELP response
    help: Frame,
}

impl<S: FileStore> Dispatcher<S> {
    /// Create a dispatcher; fails if the help text does not fit a length5 field
    pub fn new(store: S, help_text: &str) -> Result<Self> {
        Ok(Self {
            store,
            help: encode_help(help_text)?,
        })
    }

    /// Get the file store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one request whose header has already been read
    ///
    /// Only stream failures are returned as errors. File operation failures
    /// and unknown opcodes become response frames.
    pub fn dispatch<R: Read>(&self, header: Header, reader: &mut R) -> Result<Dispatch> {
        let Some(opcode) = header.opcode() else {
            tracing::warn!("Unknown request opcode 0b{:03b} ({})", header.code(), header);
            return Ok(Dispatch::Reply(encode_status(ResponseCode::UnknownRequest)));
        };

        tracing::debug!(header = %header, opcode = opcode.name(), "request header");

        let request = match read_request_body(opcode, header, reader) {
            Ok(request) => request,
            Err(SftsError::InvalidFilename(reason)) => {
                tracing::warn!("{} request with invalid filename: {}", opcode.name(), reason);
                return Ok(Dispatch::Reply(Self::failure(opcode)));
            }
            Err(e) => return Err(e),
        };

        let frame = match request {
            Request::Put { filename, data } => self.put(&filename, &data),
            Request::Get { filename } => self.get(&filename),
            Request::Change { old_name, new_name } => self.change(&old_name, &new_name),
            Request::Help => {
                tracing::info!("Client HELP request");
                self.help.clone()
            }
            Request::Bye => {
                tracing::info!("Client BYE request");
                return Ok(Dispatch::Close);
            }
        };

        tracing::debug!(header = %frame.header(), len = frame.wire_len(), "response");
        Ok(Dispatch::Reply(frame))
    }

    fn put(&self, filename: &Filename, data: &[u8]) -> Frame {
        tracing::info!("Client PUT request: {}", filename);
        tracing::debug!(filename = %filename, size = data.len(), "PUT body");

        match self.store.write_file(filename.as_str(), data) {
            Ok(()) => encode_status(ResponseCode::Ok),
            Err(e) => {
                tracing::warn!("Could not create file \"{}\": {}", filename, e);
                encode_status(ResponseCode::Failed)
            }
        }
    }

    fn get(&self, filename: &Filename) -> Frame {
        tracing::info!("Client GET request: {}", filename);

        let data = match self.store.read_file(filename.as_str()) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("GET \"{}\" failed: {}", filename, e);
                return encode_status(ResponseCode::NotFound);
            }
        };

        match encode_get_ok(filename, &data) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("GET \"{}\" cannot be sent: {}", filename, e);
                encode_status(ResponseCode::NotFound)
            }
        }
    }

    fn change(&self, old_name: &Filename, new_name: &Filename) -> Frame {
        tracing::info!("Client CHANGE request: {} to {}", old_name, new_name);

        match self.store.rename_file(old_name.as_str(), new_name.as_str()) {
            Ok(()) => encode_status(ResponseCode::Ok),
            Err(e) => {
                tracing::warn!("Change unsuccessful: {}", e);
                encode_status(ResponseCode::Failed)
            }
        }
    }

    /// Failure reply for a request that could not be carried out
    fn failure(opcode: Opcode) -> Frame {
        match opcode {
            Opcode::Get => encode_status(ResponseCode::NotFound),
            _ => encode_status(ResponseCode::Failed),
        }
    }
}
