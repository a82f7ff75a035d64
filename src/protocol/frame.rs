//! Frame definition
//!
//! One complete protocol message: a header byte plus its payload.

use bytes::{BufMut, Bytes, BytesMut};

use super::Header;

/// An encoded frame ready to be written to a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: Header,
    payload: Bytes,
}

impl Frame {
    pub fn new(header: Header, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// A frame that is only a header byte
    pub fn bare(header: Header) -> Self {
        Self {
            header,
            payload: Bytes::new(),
        }
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Everything after the header byte
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Number of bytes this frame occupies on the wire
    pub fn wire_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// Contiguous wire bytes (header followed by payload)
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        buf.put_u8(self.header.to_byte());
        buf.put_slice(&self.payload);
        buf.freeze()
    }
}
