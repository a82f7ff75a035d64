//! TCP Server
//!
//! Accepts connections and serves each one on its own thread.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, SendTimeoutError};

use crate::config::Config;
use crate::error::{Result, SftsError};
use crate::storage::FileStore;

use super::{Connection, Dispatcher};

/// How often the accept loop looks at the shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Stops a running server from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Signal the server to stop accepting connections.
    /// Connections already being served run to completion.
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// TCP server for SFTS
///
/// ## Concurrency:
/// - One thread per accepted connection, no state shared between them
///   except the dispatcher's file store
/// - At most `max_connections` served at once; a bounded channel holds one
///   token per live connection and the accept loop waits for room before
///   accepting again
pub struct Server<S: FileStore + 'static> {
    config: Config,
    listener: TcpListener,
    dispatcher: Arc<Dispatcher<S>>,
    shutdown: ShutdownHandle,
}

impl<S: FileStore + 'static> Server<S> {
    /// Validate the config and bind the listen address
    pub fn bind(config: Config, store: S) -> Result<Self> {
        config.validate()?;

        let dispatcher = Arc::new(Dispatcher::new(store, &config.help_text)?);

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            SftsError::Network(format!("cannot listen on {}: {}", config.listen_addr, e))
        })?;
        // Polled so that shutdown is noticed between connections
        listener.set_nonblocking(true)?;

        tracing::info!("Server listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            listener,
            dispatcher,
            shutdown: ShutdownHandle {
                flag: Arc::new(AtomicBool::new(false)),
            },
        })
    }

    /// Get the address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Get a handle that can stop `run` from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Start the server (blocking until shutdown)
    pub fn run(&self) -> Result<()> {
        let (slots, released) = channel::bounded::<()>(self.config.max_connections);

        while !self.shutdown.is_shutdown() {
            // Wait for a free connection slot
            match slots.send_timeout((), POLL_INTERVAL) {
                Ok(()) => {}
                Err(SendTimeoutError::Timeout(())) => continue,
                Err(SendTimeoutError::Disconnected(())) => {
                    return Err(SftsError::Network("connection slots closed".to_string()));
                }
            }

            let Some((stream, addr)) = self.accept_next() else {
                break;
            };

            tracing::info!("New connection: {}", addr);
            self.spawn_connection(stream, addr, &released);
        }

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Poll the listener until a connection arrives or shutdown is requested
    fn accept_next(&self) -> Option<(TcpStream, SocketAddr)> {
        while !self.shutdown.is_shutdown() {
            match self.listener.accept() {
                Ok(accepted) => return Some(accepted),
                Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    thread::sleep(POLL_INTERVAL);
                }
            }
        }
        None
    }

    fn spawn_connection(&self, stream: TcpStream, addr: SocketAddr, released: &Receiver<()>) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let read_ms = self.config.read_timeout_ms;
        let write_ms = self.config.write_timeout_ms;
        let slot = released.clone();

        let spawned = thread::Builder::new()
            .name(format!("sfts-conn-{}", addr))
            .spawn(move || {
                if let Err(e) = serve(stream, dispatcher, read_ms, write_ms) {
                    tracing::warn!("Connection {} ended with error: {}", addr, e);
                }
                tracing::info!("Closed connection: {}", addr);
                let _ = slot.recv();
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn handler for {}: {}", addr, e);
            // Give back the slot taken for this connection
            let _ = released.try_recv();
        }
    }
}

/// Serve one connection to completion
fn serve<S: FileStore>(
    stream: TcpStream,
    dispatcher: Arc<Dispatcher<S>>,
    read_ms: u64,
    write_ms: u64,
) -> Result<()> {
    let mut connection = Connection::new(stream, dispatcher)?;
    connection.set_timeouts(read_ms, write_ms)?;
    connection.handle()
}
