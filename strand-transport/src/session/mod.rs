//! The peer session.
//!
//! This module provides:
//! - Session identification and connection direction
//! - The session state machine
//! - The live transport: dual construction, connect, send, receive,
//!   exactly-once teardown

pub mod connection;
pub mod info;
pub mod state;

// Re-export main types
pub use connection::Session;
pub use info::{Direction, SessionId};
pub use state::SessionState;
