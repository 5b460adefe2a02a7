//! Wire encoding for the Strand protocol.
//!
//! This crate defines how protocol messages map to bytes on a stream:
//!
//! - Deterministic binary serialization (bincode with a fixed configuration)
//! - Length-prefixed framing with a magic header and a frame size cap
//!
//! The framing codec implements [`tokio_util::codec::Decoder`] and
//! [`tokio_util::codec::Encoder`], so it plugs directly into `FramedRead`
//! and `FramedWrite` over any byte stream. It is generic over the message
//! type: the transport layer never interprets message contents.

pub mod error;
pub mod framing;
pub mod serialization;

pub use error::{WireError, WireResult};
pub use framing::{MessageCodec, HEADER_LEN, MAX_FRAME, WIRE_MAGIC};
pub use serialization::{deserialize, serialize, serialized_size};
