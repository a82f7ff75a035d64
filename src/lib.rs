//! # SFTS
//!
//! Simple File Transfer Service: a client and server exchanging files over
//! one persistent TCP connection with:
//! - A single-byte header (3-bit code + 5-bit length) per message
//! - PUT, GET, CHANGE (rename), HELP and BYE over the same stream
//! - Blocking I/O, one thread per connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────┐          ┌──────────────────────────────┐
//! │            Client            │          │            Server            │
//! │                              │          │   (accept loop, 1 thread /   │
//! │  parse_command ─▶ builder ───┼── req ──▶│    connection)               │
//! │                              │          │             │                │
//! │  interpreter ◀───────────────┼── resp ──┤        Dispatcher            │
//! │      │                       │          │             │                │
//! └──────┼───────────────────────┘          └─────────────┼────────────────┘
//!        ▼                                                ▼
//!  ┌─────────────┐                                 ┌─────────────┐
//!  │  FileStore  │                                 │  FileStore  │
//!  │   (local)   │                                 │  (served)   │
//!  └─────────────┘                                 └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod storage;
pub mod client;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SftsError};
pub use config::Config;
pub use client::Session;
pub use network::Server;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SFTS
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
