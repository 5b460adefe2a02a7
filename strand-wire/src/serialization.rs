//! Deterministic binary serialization.
//!
//! All framed payloads use bincode with a fixed configuration so that the
//! same value produces the same bytes on every platform:
//!
//! - Fixed-size integer encoding (not variable-length)
//! - Little-endian byte order
//! - Trailing bytes rejected on deserialization

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::WireError;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Serialize a value to bytes.
pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, WireError> {
    options()
        .serialize(value)
        .map_err(|e| WireError::Encode(e.to_string()))
}

/// Deserialize a value from bytes.
///
/// Fails on malformed input, a type mismatch, or trailing bytes after the
/// value.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
    options()
        .deserialize(bytes)
        .map_err(|e| WireError::Decode(e.to_string()))
}

/// Serialized size of a value without producing the bytes.
pub fn serialized_size<T: Serialize>(value: &T) -> Result<u64, WireError> {
    options()
        .serialized_size(value)
        .map_err(|e| WireError::Encode(e.to_string()))
}
