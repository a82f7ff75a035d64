//! Response definitions
//!
//! Represents responses to clients.

use bytes::Bytes;

use super::Filename;

/// Response codes. `0b100` and `0b111` are unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResponseCode {
    Ok = 0b000,
    GetOk = 0b001,
    NotFound = 0b010,
    UnknownRequest = 0b011,
    Failed = 0b101,
    HelpOk = 0b110,
}

impl ResponseCode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0b000 => Some(ResponseCode::Ok),
            0b001 => Some(ResponseCode::GetOk),
            0b010 => Some(ResponseCode::NotFound),
            0b011 => Some(ResponseCode::UnknownRequest),
            0b101 => Some(ResponseCode::Failed),
            0b110 => Some(ResponseCode::HelpOk),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A decoded response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// PUT or CHANGE succeeded
    Ok,

    /// GET succeeded; carries the file
    GetOk { filename: Filename, data: Bytes },

    /// GET target does not exist or could not be read
    NotFound,

    /// The server did not recognize the opcode
    UnknownRequest,

    /// PUT or CHANGE failed
    Failed,

    /// HELP text
    Help { text: String },

    /// A code the protocol leaves undefined
    Unrecognized { code: u8 },
}

impl Response {
    /// The 3-bit code this response is sent with
    pub fn code(&self) -> u8 {
        match self {
            Response::Ok => ResponseCode::Ok.code(),
            Response::GetOk { .. } => ResponseCode::GetOk.code(),
            Response::NotFound => ResponseCode::NotFound.code(),
            Response::UnknownRequest => ResponseCode::UnknownRequest.code(),
            Response::Failed => ResponseCode::Failed.code(),
            Response::Help { .. } => ResponseCode::HelpOk.code(),
            Response::Unrecognized { code } => *code,
        }
    }
}
