//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────────────────┬─────────────────────────────┐
//! │ Opcode(3) | Len5 (5) │         Payload             │
//! └──────────────────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Opcode
//! - PUT:    filename (len5) + size (4, BE) + data
//! - GET:    filename (len5)
//! - CHANGE: old name (len5) + new_len (1) + new name
//! - HELP:   empty
//! - BYE:    empty
//!
//! ### Response Format
//! ```text
//! ┌──────────────────────┬─────────────────────────────┐
//! │ Status(3) | Len5 (5) │         Payload             │
//! └──────────────────────┴─────────────────────────────┘
//! ```
//!
//! Unlike a length-prefixed frame, the total size of a message is only
//! known by walking its fields, so decoding happens directly against the
//! stream: the header is read first and then exactly the fields its code
//! calls for.

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, SftsError};
use super::{Filename, Frame, Header, Opcode, Request, Response, ResponseCode};

/// Width of the file size field
pub const SIZE_FIELD_LEN: usize = 4;

/// Largest file the size field can describe
pub const MAX_FILE_SIZE: u64 = u32::MAX as u64;

/// Upper bound on the up-front allocation for a file body. Larger bodies
/// grow as bytes actually arrive.
const INITIAL_BODY_CAPACITY: usize = 64 * 1024;

// =============================================================================
// Field Encoding
// =============================================================================

/// Pack a code and length into a header byte
pub fn encode_header(code: u8, length: usize) -> Result<u8> {
    Ok(Header::new(code, length)?.to_byte())
}

/// Unpack a header byte
pub fn decode_header(byte: u8) -> Header {
    Header::from_byte(byte)
}

/// Encode a file size as the 4-byte big-endian size field
pub fn encode_size(len: usize) -> Result<[u8; SIZE_FIELD_LEN]> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| SftsError::FileTooLarge { size: len as u64 })
}

/// filename + size + data, shared by PUT requests and GET responses
fn file_frame(code: u8, filename: &Filename, data: &[u8]) -> Result<Frame> {
    let size = encode_size(data.len())?;

    let mut payload =
        BytesMut::with_capacity(filename.as_bytes().len() + SIZE_FIELD_LEN + data.len());
    payload.put_slice(filename.as_bytes());
    payload.put_slice(&size);
    payload.put_slice(data);

    Ok(Frame::new(
        Header::from_parts(code, filename.field_len()),
        payload.freeze(),
    ))
}

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a PUT request
///
/// Format: header(PUT, name_len) + name + size (4) + data
pub fn encode_put(filename: &Filename, data: &[u8]) -> Result<Frame> {
    file_frame(Opcode::Put.code(), filename, data)
}

/// Encode a GET request
///
/// Format: header(GET, name_len) + name
pub fn encode_get(filename: &Filename) -> Frame {
    Frame::new(
        Header::from_parts(Opcode::Get.code(), filename.field_len()),
        Bytes::copy_from_slice(filename.as_bytes()),
    )
}

/// Encode a CHANGE request
///
/// Format: header(CHANGE, old_len) + old name + new_len (1) + new name
pub fn encode_change(old_name: &Filename, new_name: &Filename) -> Frame {
    let mut payload =
        BytesMut::with_capacity(old_name.as_bytes().len() + 1 + new_name.as_bytes().len());
    payload.put_slice(old_name.as_bytes());
    payload.put_u8(new_name.field_len());
    payload.put_slice(new_name.as_bytes());

    Frame::new(
        Header::from_parts(Opcode::Change.code(), old_name.field_len()),
        payload.freeze(),
    )
}

/// Encode a request that is only a header byte (HELP, BYE)
pub fn encode_bare(opcode: Opcode) -> Frame {
    Frame::bare(Header::from_parts(opcode.code(), 0))
}

/// Encode any request
pub fn encode_request(request: &Request) -> Result<Frame> {
    match request {
        Request::Put { filename, data } => encode_put(filename, data),
        Request::Get { filename } => Ok(encode_get(filename)),
        Request::Change { old_name, new_name } => Ok(encode_change(old_name, new_name)),
        Request::Help => Ok(encode_bare(Opcode::Help)),
        Request::Bye => Ok(encode_bare(Opcode::Bye)),
    }
}

// =============================================================================
// Response Encoding
// =============================================================================

/// Encode a response that is only a header byte
pub fn encode_status(code: ResponseCode) -> Frame {
    Frame::bare(Header::from_parts(code.code(), 0))
}

/// Encode a successful GET response
///
/// Format: header(GET_OK, name_len) + name + size (4) + data
pub fn encode_get_ok(filename: &Filename, data: &[u8]) -> Result<Frame> {
    file_frame(ResponseCode::GetOk.code(), filename, data)
}

/// Encode a HELP response
///
/// Format: header(HELP_OK, text_len) + text
pub fn encode_help(text: &str) -> Result<Frame> {
    let header = Header::new(ResponseCode::HelpOk.code(), text.len())?;
    Ok(Frame::new(header, Bytes::copy_from_slice(text.as_bytes())))
}

/// Encode any response
pub fn encode_response(response: &Response) -> Result<Frame> {
    match response {
        Response::GetOk { filename, data } => encode_get_ok(filename, data),
        Response::Help { text } => encode_help(text),
        Response::Unrecognized { code } => Ok(Frame::bare(Header::new(*code, 0)?)),
        Response::Ok => Ok(encode_status(ResponseCode::Ok)),
        Response::NotFound => Ok(encode_status(ResponseCode::NotFound)),
        Response::UnknownRequest => Ok(encode_status(ResponseCode::UnknownRequest)),
        Response::Failed => Ok(encode_status(ResponseCode::Failed)),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one header byte
///
/// Blocks until the byte arrives or the stream fails
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(Header::from_byte(byte[0]))
}

/// Read a fixed-length field
fn read_field<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut field = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut field)?;
    }
    Ok(field)
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

/// Read a size field followed by that many bytes
fn read_sized_data<R: Read>(reader: &mut R) -> Result<Bytes> {
    let mut size_buf = [0u8; SIZE_FIELD_LEN];
    reader.read_exact(&mut size_buf)?;
    let size = u32::from_be_bytes(size_buf) as usize;

    let mut data = Vec::with_capacity(size.min(INITIAL_BODY_CAPACITY));
    reader.by_ref().take(size as u64).read_to_end(&mut data)?;

    if data.len() < size {
        return Err(SftsError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("file body truncated: expected {} bytes, got {}", size, data.len()),
        )));
    }

    Ok(Bytes::from(data))
}

/// Read the payload that follows a request header
///
/// All fields are consumed before any of them is validated, so an invalid
/// filename leaves the stream positioned at the next request.
pub fn read_request_body<R: Read>(
    opcode: Opcode,
    header: Header,
    reader: &mut R,
) -> Result<Request> {
    let length = header.length() as usize;

    match opcode {
        Opcode::Put => {
            let name = read_field(reader, length)?;
            let data = read_sized_data(reader)?;
            Ok(Request::Put {
                filename: Filename::from_bytes(name)?,
                data,
            })
        }
        Opcode::Get => {
            let name = read_field(reader, length)?;
            Ok(Request::Get {
                filename: Filename::from_bytes(name)?,
            })
        }
        Opcode::Change => {
            let old_name = read_field(reader, length)?;
            let new_len = read_u8(reader)? as usize;
            let new_name = read_field(reader, new_len)?;
            Ok(Request::Change {
                old_name: Filename::from_bytes(old_name)?,
                new_name: Filename::from_bytes(new_name)?,
            })
        }
        Opcode::Help => Ok(Request::Help),
        Opcode::Bye => Ok(Request::Bye),
    }
}

/// Read the payload that follows a response header
///
/// Codes the protocol does not define carry no payload and decode to
/// `Response::Unrecognized`.
pub fn read_response_body<R: Read>(header: Header, reader: &mut R) -> Result<Response> {
    let length = header.length() as usize;

    let Some(code) = header.response_code() else {
        return Ok(Response::Unrecognized {
            code: header.code(),
        });
    };

    match code {
        ResponseCode::GetOk => {
            let name = read_field(reader, length)?;
            let data = read_sized_data(reader)?;
            Ok(Response::GetOk {
                filename: Filename::from_bytes(name)?,
                data,
            })
        }
        ResponseCode::HelpOk => {
            let text = read_field(reader, length)?;
            Ok(Response::Help {
                text: String::from_utf8_lossy(&text).into_owned(),
            })
        }
        ResponseCode::Ok => Ok(Response::Ok),
        ResponseCode::NotFound => Ok(Response::NotFound),
        ResponseCode::UnknownRequest => Ok(Response::UnknownRequest),
        ResponseCode::Failed => Ok(Response::Failed),
    }
}

/// Write a frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    writer.write_all(&[frame.header().to_byte()])?;
    writer.write_all(frame.payload())?;
    writer.flush()?;
    Ok(())
}
