//! Request definitions
//!
//! Represents requests from clients.

use bytes::Bytes;

use super::Filename;

/// Request opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Put = 0b000,
    Get = 0b001,
    Change = 0b010,
    Help = 0b011,
    Bye = 0b100,
}

impl Opcode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0b000 => Some(Opcode::Put),
            0b001 => Some(Opcode::Get),
            0b010 => Some(Opcode::Change),
            0b011 => Some(Opcode::Help),
            0b100 => Some(Opcode::Bye),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Put => "PUT",
            Opcode::Get => "GET",
            Opcode::Change => "CHANGE",
            Opcode::Help => "HELP",
            Opcode::Bye => "BYE",
        }
    }
}

/// A decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Upload a file, overwriting any file with the same name
    Put { filename: Filename, data: Bytes },

    /// Download a file
    Get { filename: Filename },

    /// Rename a file
    Change { old_name: Filename, new_name: Filename },

    /// Ask for the supported commands
    Help,

    /// End the session
    Bye,
}

impl Request {
    pub fn opcode(&self) -> Opcode {
        match self {
            Request::Put { .. } => Opcode::Put,
            Request::Get { .. } => Opcode::Get,
            Request::Change { .. } => Opcode::Change,
            Request::Help => Opcode::Help,
            Request::Bye => Opcode::Bye,
        }
    }
}
