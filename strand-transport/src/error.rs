//! Transport error types.
//!
//! The error surface is deliberately small. Transport-level failures
//! (connect refusal, decode errors, deadlines, use after disposal) are
//! normalized into a disconnect notification plus a `false`/`None` return,
//! so callers never branch on failure kind. Only two conditions are real
//! errors: an OS socket that could not be created or inspected, and the
//! usage bug of sending before the session is connected.

use std::io;
use thiserror::Error;

/// Errors surfaced by session construction and use.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The OS socket could not be created or its peer address read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `send` was called before the session reached connected. This is a
    /// bug in the calling code, not a network condition; the session is
    /// still usable once `connect` succeeds.
    #[error("session is not connected")]
    NotConnected,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
