//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::{read_header, write_frame, Frame};
use crate::storage::FileStore;

use super::{Dispatch, Dispatcher};

/// Handles a single client connection
pub struct Connection<S: FileStore> {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Shared request dispatcher
    dispatcher: Arc<Dispatcher<S>>,

    /// Peer address for logging
    peer_addr: String,
}

impl<S: FileStore> Connection<S> {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O on a blocking stream
    pub fn new(stream: TcpStream, dispatcher: Arc<Dispatcher<S>>) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Accepted from a non-blocking listener; requests are read blocking
        stream.set_nonblocking(false)?;

        // Disable Nagle's algorithm; most replies are a single byte
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            dispatcher,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves the stream blocking forever)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads requests in a loop and sends responses.
    /// Returns on BYE, when the client disconnects, or on an error.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            // Read next header byte
            let header = match read_header(&mut self.reader) {
                Ok(header) => header,
                Err(e) if e.is_disconnect() => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(e) if e.is_timeout() => {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            };

            // Read the body and run the request
            let dispatch = match self.dispatcher.dispatch(header, &mut self.reader) {
                Ok(dispatch) => dispatch,
                Err(e) if e.is_disconnect() || e.is_timeout() => {
                    tracing::debug!(
                        "Client {} went away in the middle of a request: {}",
                        self.peer_addr,
                        e
                    );
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading request from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            };

            let frame = match dispatch {
                Dispatch::Reply(frame) => frame,
                Dispatch::Close => {
                    tracing::debug!("Client {} said bye", self.peer_addr);
                    return Ok(());
                }
            };

            // Send response
            if let Err(e) = self.send(&frame) {
                // If the client disconnected before we could send the response,
                // log and exit rather than treating it as a server error.
                if e.is_disconnect() {
                    tracing::debug!(
                        "Client {} disconnected before response could be sent: {}",
                        self.peer_addr,
                        e
                    );
                    return Ok(());
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Send a response frame to the client
    fn send(&mut self, frame: &Frame) -> Result<()> {
        write_frame(&mut self.writer, frame)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
