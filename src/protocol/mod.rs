//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Frame Format
//!
//! Every message is a single header byte followed by whatever payload the
//! header's code dictates. There is no magic, version or checksum.
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! │   code    │      length5      │   + payload (0..N bytes)
//! └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! ### Opcodes (requests)
//! - 0b000: PUT    - filename (length5) + size (4, BE) + data
//! - 0b001: GET    - filename (length5)
//! - 0b010: CHANGE - old name (length5) + new length (1) + new name
//! - 0b011: HELP   - empty
//! - 0b100: BYE    - empty, no response
//!
//! ### Response Codes
//! - 0b000: OK (put/change)
//! - 0b001: GET OK - filename (length5) + size (4, BE) + data
//! - 0b010: GET NOT FOUND
//! - 0b011: UNKNOWN REQUEST
//! - 0b101: FAILED (put/change)
//! - 0b110: HELP OK - help text (length5)

mod header;
mod filename;
mod frame;
mod request;
mod response;
mod codec;

pub use header::{Header, MAX_CODE, MAX_FIELD_LEN};
pub use filename::{Filename, MAX_FILENAME_LEN};
pub use frame::Frame;
pub use request::{Opcode, Request};
pub use response::{Response, ResponseCode};
pub use codec::{
    decode_header, encode_header, encode_size, MAX_FILE_SIZE, SIZE_FIELD_LEN,
    encode_bare, encode_change, encode_get, encode_put, encode_request,
    encode_get_ok, encode_help, encode_response, encode_status,
    read_header, read_request_body, read_response_body, write_frame,
};
