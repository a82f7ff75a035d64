//! Network Module
//!
//! TCP server and connection handling.
//!
//! ## Architecture
//! - Single acceptor thread (non-blocking listener, polled)
//! - One thread per connection, bounded by `max_connections`
//! - Requests routed through the shared Dispatcher

mod server;
mod connection;
mod dispatcher;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use dispatcher::{Dispatch, Dispatcher};
