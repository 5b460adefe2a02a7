//! Single peer-connection transport for the Strand protocol.
//!
//! This crate owns the full lifecycle of one physical connection to a
//! remote peer:
//!
//! - Establishing it, as the dialing side or around an accepted socket
//! - Normalizing the peer address to canonical IPv6-mapped form
//! - Framing outgoing messages and decoding incoming bytes through a
//!   pluggable codec
//! - Bounding every I/O wait by a deadline
//! - Tearing the connection down exactly once, whichever path gets there
//!   first
//!
//! Everything above the connection (discovery, the connection registry,
//! message dispatch) lives with the owner, which constructs sessions,
//! drives `connect`/`send`/`receive`, and watches the event channel for
//! the disconnect notification.
//!
//! # Usage
//!
//! ```ignore
//! use strand_transport::{Session, SessionConfig, SessionEvent, SessionId};
//! use strand_wire::MessageCodec;
//! use tokio::sync::mpsc;
//!
//! let (events, mut event_rx) = mpsc::unbounded_channel::<SessionEvent>();
//! let session: Session<MyMessage, _> = Session::outbound(
//!     SessionId::new(1),
//!     "203.0.113.5:10333".parse().unwrap(),
//!     MessageCodec::new(),
//!     SessionConfig::default(),
//!     events,
//! )?;
//!
//! if session.connect().await {
//!     session.send(MyMessage::Hello).await?;
//!     if let Some(reply) = session.receive(Duration::from_secs(30)).await {
//!         // ...
//!     }
//! }
//! // Either path above may already have torn the session down; the
//! // Disconnected event on event_rx is the single source of truth.
//! ```

pub mod config;
pub mod deadline;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod session;

// Re-export main types
pub use config::{SessionConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_DEADLINE};
pub use deadline::DeadlineError;
pub use endpoint::AddressFamily;
pub use error::{SessionError, SessionResult};
pub use event::SessionEvent;
pub use session::{Direction, Session, SessionId, SessionState};
