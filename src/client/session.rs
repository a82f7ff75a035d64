//! Client Session
//!
//! One connection to a server, driven one command at a time.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use crate::error::{Result, SftsError};
use crate::protocol::{read_header, write_frame};
use crate::storage::FileStore;

use super::{build_request, interpret, parse_command, Command, Outcome};

/// A connected client
pub struct Session<S: FileStore> {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Where PUT reads from and GET saves to
    store: S,

    /// Server address for logging
    peer_addr: String,

    /// Set once BYE has been sent
    closed: bool,
}

/// Socket failures end the session, so they are reported as `Network`
/// rather than mixed in with local file errors.
fn network(err: SftsError) -> SftsError {
    match err {
        SftsError::Io(e) => SftsError::Network(e.to_string()),
        other => other,
    }
}

impl<S: FileStore> Session<S> {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A, store: S) -> Result<Self> {
        let stream = TcpStream::connect(addr).map_err(|e| SftsError::Network(e.to_string()))?;
        Self::from_stream(stream, store)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, store: S) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;

        tracing::debug!("Session established with {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            store,
            peer_addr,
            closed: false,
        })
    }

    /// Run one command
    ///
    /// Returns `Ok(None)` for BYE, which gets no response. Local failures
    /// (unreadable PUT source) are returned before anything is sent and
    /// leave the session usable.
    pub fn execute(&mut self, command: &Command) -> Result<Option<Outcome>> {
        if self.closed {
            return Err(SftsError::Network("session already closed".to_string()));
        }

        let frame = build_request(&self.store, command)?;

        tracing::debug!(
            "Sending {} to {} ({} bytes)",
            command.opcode().name(),
            self.peer_addr,
            frame.wire_len()
        );
        write_frame(&mut self.writer, &frame).map_err(network)?;

        if let Command::Bye = command {
            self.close();
            return Ok(None);
        }

        let header = read_header(&mut self.reader).map_err(network)?;
        let outcome = interpret(header, &mut self.reader, command, &self.store).map_err(network)?;

        Ok(Some(outcome))
    }

    /// Parse and run one input line
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>> {
        let command = parse_command(line)?;
        self.execute(&command)
    }

    /// True once BYE has been sent
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get the server address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Get the local file store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn close(&mut self) {
        self.closed = true;
        // The server closes its end on BYE; errors here only mean it got there first
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
        tracing::debug!("Session with {} closed", self.peer_addr);
    }
}
