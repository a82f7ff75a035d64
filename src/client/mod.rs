//! Client Module
//!
//! Turns operator commands into request frames and server replies into
//! outcomes.
//!
//! ## Flow
//! ```text
//!  "put a.txt" ──parse_command──▶ Command ──build_request──▶ Frame ──▶ socket
//!                                    │
//!  Outcome ◀──────interpret──────────┘ (context) ◀── header byte + payload
//! ```

pub mod command;
pub mod builder;
pub mod interpreter;
mod session;

pub use command::{parse_command, Command};
pub use builder::{build_bye, build_change, build_get, build_help, build_put, build_request};
pub use interpreter::{interpret, Outcome};
pub use session::Session;
