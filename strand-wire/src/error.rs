//! Wire-level error types.

use std::io;
use thiserror::Error;

/// Errors produced while encoding or decoding framed messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize a message.
    #[error("encode error: {0}")]
    Encode(String),

    /// Failed to deserialize a message payload.
    #[error("decode error: {0}")]
    Decode(String),

    /// Frame length exceeds the configured cap.
    #[error("frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// Frame header did not start with the wire magic.
    #[error("invalid wire magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },
}

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;
