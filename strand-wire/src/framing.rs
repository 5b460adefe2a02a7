//! Length-prefixed message framing codec.
//!
//! Frames are laid out as:
//! - 4 bytes: wire magic
//! - 4 bytes: big-endian payload length
//! - N bytes: bincode-serialized message
//!
//! The codec is generic over the message type; any `serde` type can ride
//! the frame. One codec value seeds both directions of a split stream, so
//! it is `Clone` regardless of the message type.

use std::marker::PhantomData;

use bytes::{Buf, BufMut, BytesMut};
use serde::{de::DeserializeOwned, Serialize};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::WireError;
use crate::serialization;

/// Magic bytes identifying the Strand wire format.
pub const WIRE_MAGIC: [u8; 4] = [0x53, 0x54, 0x52, 0x4E]; // "STRN"

/// Default maximum payload size in bytes (1 MiB).
pub const MAX_FRAME: usize = 1024 * 1024;

/// Header size: 4 bytes magic + 4 bytes length.
pub const HEADER_LEN: usize = 8;

/// Codec for length-prefixed message framing.
#[derive(Debug)]
pub struct MessageCodec<M> {
    /// Payload length of the frame being read, once its header is in.
    pending_len: Option<usize>,
    /// Maximum accepted payload size, both directions.
    max_frame: usize,
    _marker: PhantomData<fn() -> M>,
}

impl<M> MessageCodec<M> {
    /// Create a codec with the default frame size cap.
    pub fn new() -> Self {
        Self::with_max_frame(MAX_FRAME)
    }

    /// Create a codec with a custom frame size cap.
    pub fn with_max_frame(max_frame: usize) -> Self {
        Self {
            pending_len: None,
            max_frame,
            _marker: PhantomData,
        }
    }

    /// The configured frame size cap.
    pub fn max_frame(&self) -> usize {
        self.max_frame
    }
}

impl<M> Default for MessageCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for MessageCodec<M> {
    fn clone(&self) -> Self {
        // Mid-frame decode state is intentionally not carried over; a clone
        // starts at a frame boundary.
        Self::with_max_frame(self.max_frame)
    }
}

impl<M: DeserializeOwned> Decoder for MessageCodec<M> {
    type Item = M;
    type Error = WireError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<M>, WireError> {
        if self.pending_len.is_none() {
            if src.len() < HEADER_LEN {
                return Ok(None);
            }

            let magic: [u8; 4] = src[0..4].try_into().expect("slice is 4 bytes");
            if magic != WIRE_MAGIC {
                return Err(WireError::InvalidMagic {
                    expected: WIRE_MAGIC,
                    actual: magic,
                });
            }

            let length = u32::from_be_bytes(src[4..8].try_into().expect("slice is 4 bytes")) as usize;
            if length > self.max_frame {
                return Err(WireError::FrameTooLarge {
                    size: length,
                    max: self.max_frame,
                });
            }

            self.pending_len = Some(length);
        }

        let length = self.pending_len.expect("header parsed above");
        if src.len() < HEADER_LEN + length {
            src.reserve(HEADER_LEN + length - src.len());
            return Ok(None);
        }

        src.advance(HEADER_LEN);
        let payload = src.split_to(length);
        self.pending_len = None;

        let message = serialization::deserialize(&payload)?;
        Ok(Some(message))
    }
}

impl<M: Serialize> Encoder<M> for MessageCodec<M> {
    type Error = WireError;

    fn encode(&mut self, message: M, dst: &mut BytesMut) -> Result<(), WireError> {
        let payload = serialization::serialize(&message)?;
        let length = payload.len();

        if length > self.max_frame {
            return Err(WireError::FrameTooLarge {
                size: length,
                max: self.max_frame,
            });
        }

        dst.reserve(HEADER_LEN + length);
        dst.put_slice(&WIRE_MAGIC);
        dst.put_u32(length as u32);
        dst.put_slice(&payload);

        Ok(())
    }
}
