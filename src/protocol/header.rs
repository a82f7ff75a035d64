//! Header byte
//!
//! The 3-bit code and 5-bit length packed into the first byte of a frame.

use std::fmt;

use crate::error::{Result, SftsError};
use super::{Opcode, ResponseCode};

/// Largest value the 3-bit code field can hold
pub const MAX_CODE: u8 = 0b111;

/// Largest value the 5-bit length field can hold
pub const MAX_FIELD_LEN: usize = 31;

const CODE_SHIFT: u8 = 5;
const LENGTH_MASK: u8 = 0x1F;

/// A decoded header byte
///
/// The code is kept raw so that any byte read off the wire decodes;
/// `opcode()` and `response_code()` give the typed view for each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    code: u8,
    length: u8,
}

impl Header {
    /// Build a header, rejecting values that do not fit their bit fields
    pub fn new(code: u8, length: usize) -> Result<Self> {
        if code > MAX_CODE {
            return Err(SftsError::FieldOverflow {
                field: "code",
                value: code as usize,
                max: MAX_CODE as usize,
            });
        }
        if length > MAX_FIELD_LEN {
            return Err(SftsError::FieldOverflow {
                field: "length",
                value: length,
                max: MAX_FIELD_LEN,
            });
        }
        Ok(Self {
            code,
            length: length as u8,
        })
    }

    /// Build a header from values the caller already knows are in range
    /// (a typed code and a validated `Filename` length).
    pub(crate) fn from_parts(code: u8, length: u8) -> Self {
        debug_assert!(code <= MAX_CODE && length as usize <= MAX_FIELD_LEN);
        Self { code, length }
    }

    /// Decode a header byte. Every byte is a valid header.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            code: byte >> CODE_SHIFT,
            length: byte & LENGTH_MASK,
        }
    }

    /// Encode as the single wire byte
    pub fn to_byte(self) -> u8 {
        (self.code << CODE_SHIFT) | self.length
    }

    /// The raw 3-bit code
    pub fn code(&self) -> u8 {
        self.code
    }

    /// The 5-bit length field
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Interpret the code as a request opcode
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_code(self.code)
    }

    /// Interpret the code as a response code
    pub fn response_code(&self) -> Option<ResponseCode> {
        ResponseCode::from_code(self.code)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:03b}-{:05b} (0x{:02X})", self.code, self.length, self.to_byte())
    }
}
