//! The live peer session.
//!
//! One `Session` owns one physical connection: the OS socket, the framed
//! reader and writer over its split halves, and the teardown of all of it.
//! Send and receive ride independent halves behind independent locks, so
//! one direction never stalls the other. Disposal is claimed through a
//! single atomic flag: whichever path gets there first (explicit
//! disconnect, I/O error, deadline) releases the resources and notifies
//! the owner; every other path is a no-op.

use std::fmt;
use std::marker::PhantomData;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpSocket, TcpStream};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tokio_util::codec::{Decoder, Encoder, FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;

use crate::config::SessionConfig;
use crate::deadline::{bound, DeadlineError};
use crate::endpoint::{canonical, dialable, AddressFamily};
use crate::error::{SessionError, SessionResult};
use crate::event::SessionEvent;
use crate::session::{Direction, SessionId, SessionState};

/// A single peer connection.
///
/// Generic over the protocol message type `M` and the framing codec `C`;
/// the codec is the seam to the wire format and is never interpreted here.
/// `strand_wire::MessageCodec` is the stock implementation.
pub struct Session<M, C> {
    id: SessionId,
    direction: Direction,
    family: AddressFamily,
    /// The address we were told to dial, or the observed peer address for
    /// inbound sessions. Immutable.
    listener_endpoint: SocketAddr,
    /// Canonical (IPv6-mapped) peer endpoint. Set exactly once.
    remote_endpoint: OnceLock<SocketAddr>,
    /// Outbound-only: the unconnected socket, consumed by `connect`.
    dialer: Mutex<Option<(TcpSocket, C)>>,
    reader: Mutex<Option<FramedRead<OwnedReadHalf, C>>>,
    writer: Mutex<Option<FramedWrite<OwnedWriteHalf, C>>>,
    connected: AtomicBool,
    disposed: AtomicBool,
    cancel: CancellationToken,
    config: SessionConfig,
    events: UnboundedSender<SessionEvent>,
    _marker: PhantomData<fn() -> M>,
}

impl<M, C> Session<M, C>
where
    C: Decoder<Item = M> + Encoder<M> + Clone,
    <C as Decoder>::Error: fmt::Display,
    <C as Encoder<M>>::Error: fmt::Display,
{
    /// Create an unconnected outbound session targeting `remote`.
    ///
    /// The OS socket is created here, with its family derived from the
    /// remote address: an IPv4-mapped-IPv6 target gets a plain IPv4
    /// socket. The connection itself is made by [`Session::connect`].
    pub fn outbound(
        id: SessionId,
        remote: SocketAddr,
        codec: C,
        config: SessionConfig,
        events: UnboundedSender<SessionEvent>,
    ) -> SessionResult<Self> {
        let family = AddressFamily::of(&remote);
        let socket = match family {
            AddressFamily::Ipv4 => TcpSocket::new_v4()?,
            AddressFamily::Ipv6 => TcpSocket::new_v6()?,
        };

        tracing::debug!(session = %id, peer = %remote, family = %family, "outbound session created");

        Ok(Self {
            id,
            direction: Direction::Outbound,
            family,
            listener_endpoint: remote,
            remote_endpoint: OnceLock::new(),
            dialer: Mutex::new(Some((socket, codec))),
            reader: Mutex::new(None),
            writer: Mutex::new(None),
            connected: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            cancel: CancellationToken::new(),
            config,
            events,
            _marker: PhantomData,
        })
    }

    /// Wrap an already-accepted socket in a connected session.
    ///
    /// The peer address is read off the socket and canonicalized; no
    /// network round-trip happens. Fails only if the socket is already
    /// dead enough that its peer address cannot be read.
    pub fn from_accepted(
        id: SessionId,
        stream: TcpStream,
        codec: C,
        config: SessionConfig,
        events: UnboundedSender<SessionEvent>,
    ) -> SessionResult<Self> {
        let observed = stream.peer_addr()?;

        if let Err(e) = stream.set_nodelay(true) {
            tracing::warn!(session = %id, addr = %observed, error = %e, "failed to set TCP_NODELAY");
        }

        let (read_half, write_half) = stream.into_split();
        let remote_endpoint = OnceLock::new();
        let _ = remote_endpoint.set(canonical(observed));

        tracing::debug!(session = %id, peer = %observed, "inbound session accepted");

        Ok(Self {
            id,
            direction: Direction::Inbound,
            family: AddressFamily::of(&observed),
            listener_endpoint: observed,
            remote_endpoint,
            dialer: Mutex::new(None),
            reader: Mutex::new(Some(FramedRead::new(read_half, codec.clone()))),
            writer: Mutex::new(Some(FramedWrite::new(write_half, codec))),
            connected: AtomicBool::new(true),
            disposed: AtomicBool::new(false),
            cancel: CancellationToken::new(),
            config,
            events,
            _marker: PhantomData,
        })
    }

    /// Drive the OS-level connect handshake. At most once per session.
    ///
    /// On success the session is connected and the canonical remote
    /// endpoint is fixed. On refusal, I/O error or timeout the session is
    /// torn down (non-error disconnect) and `false` comes back; nothing is
    /// raised. Calling again after the first attempt returns `false`
    /// without side effects.
    pub async fn connect(&self) -> bool {
        let Some((socket, codec)) = self.dialer.lock().await.take() else {
            return false;
        };

        let target = dialable(self.listener_endpoint);
        tracing::debug!(session = %self.id, addr = %target, "connecting");

        let stream = match bound(self.config.connect_timeout, &self.cancel, socket.connect(target)).await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                tracing::debug!(session = %self.id, addr = %target, error = %e, "connect failed");
                self.disconnect(false).await;
                return false;
            }
            Err(DeadlineError::Elapsed) => {
                tracing::debug!(session = %self.id, addr = %target, "connect timed out");
                self.disconnect(false).await;
                return false;
            }
            Err(DeadlineError::Cancelled) => {
                self.disconnect(false).await;
                return false;
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            tracing::warn!(session = %self.id, addr = %target, error = %e, "failed to set TCP_NODELAY");
        }

        // Install under both locks: a disconnect that already claimed the
        // session prevents the install; one that claims afterwards finds
        // the halves and releases them.
        let mut reader = self.reader.lock().await;
        let mut writer = self.writer.lock().await;
        if self.disposed.load(Ordering::Acquire) {
            return false;
        }

        let (read_half, write_half) = stream.into_split();
        *reader = Some(FramedRead::new(read_half, codec.clone()));
        *writer = Some(FramedWrite::new(write_half, codec));

        let remote = canonical(self.listener_endpoint);
        let _ = self.remote_endpoint.set(remote);
        self.connected.store(true, Ordering::Release);

        tracing::debug!(session = %self.id, peer = %remote, "connected");
        true
    }

    /// Receive the next message, waiting at most `deadline`.
    ///
    /// Returns the decoded message, or `None` on any of: decode failure,
    /// peer hangup, I/O error, deadline expiry, cancellation, or a session
    /// that is disposed or was never connected. Every failure except the
    /// never-connected case tears the session down first (non-error
    /// disconnect). Nothing is raised to the caller.
    pub async fn receive(&self, deadline: Duration) -> Option<M> {
        if self.disposed.load(Ordering::Acquire) {
            return None;
        }

        let mut guard = self.reader.lock().await;
        let Some(reader) = guard.as_mut() else {
            return None;
        };

        let outcome = bound(deadline, &self.cancel, reader.next()).await;
        drop(guard);

        match outcome {
            Ok(Some(Ok(message))) => Some(message),
            Ok(Some(Err(e))) => {
                tracing::debug!(session = %self.id, error = %e, "receive failed, disconnecting");
                self.disconnect(false).await;
                None
            }
            Ok(None) => {
                tracing::debug!(session = %self.id, "peer closed the stream");
                self.disconnect(false).await;
                None
            }
            Err(DeadlineError::Elapsed) => {
                tracing::debug!(session = %self.id, "receive deadline exceeded, disconnecting");
                self.disconnect(false).await;
                None
            }
            Err(DeadlineError::Cancelled) => {
                self.disconnect(false).await;
                None
            }
        }
    }

    /// Send one message, bounded by the session's fixed write deadline.
    ///
    /// `Err(SessionError::NotConnected)` before the session reached
    /// connected; nothing is written. `Ok(false)` without side effects on
    /// a disposed session. Otherwise `Ok(true)` once the frame is fully
    /// written and flushed; any write-side failure or deadline expiry
    /// tears the session down with the error flag and yields `Ok(false)`.
    pub async fn send(&self, message: M) -> SessionResult<bool> {
        if !self.connected.load(Ordering::Acquire) {
            return Err(SessionError::NotConnected);
        }
        if self.disposed.load(Ordering::Acquire) {
            return Ok(false);
        }

        let mut guard = self.writer.lock().await;
        let Some(writer) = guard.as_mut() else {
            return Ok(false);
        };

        let outcome = bound(self.config.write_deadline, &self.cancel, writer.send(message)).await;
        drop(guard);

        match outcome {
            Ok(Ok(())) => Ok(true),
            Ok(Err(e)) => {
                tracing::debug!(session = %self.id, error = %e, "send failed, disconnecting");
                self.disconnect(true).await;
                Ok(false)
            }
            Err(DeadlineError::Elapsed) => {
                tracing::debug!(session = %self.id, "write deadline exceeded, disconnecting");
                self.disconnect(true).await;
                Ok(false)
            }
            Err(DeadlineError::Cancelled) => {
                self.disconnect(true).await;
                Ok(false)
            }
        }
    }

    /// Tear the session down.
    ///
    /// Exactly one caller wins the disposed claim; that caller cancels any
    /// pending bounded operation, releases the socket and both stream
    /// halves, and delivers the single `Disconnected` notification with
    /// `error` passed through. Every other caller returns immediately.
    /// Safe to call from any path, any number of times, concurrently.
    pub async fn disconnect(&self, error: bool) {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        // Unblock pending bounded I/O before taking the locks it holds.
        self.cancel.cancel();

        drop(self.dialer.lock().await.take());
        drop(self.reader.lock().await.take());
        drop(self.writer.lock().await.take());

        tracing::debug!(
            session = %self.id,
            peer = %self.listener_endpoint,
            direction = %self.direction,
            error,
            "session disconnected"
        );

        let _ = self.events.send(SessionEvent::Disconnected {
            session: self.id,
            error,
        });
    }

    /// This session's identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Whether we dialed the peer or wrapped an accepted socket.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Address family of the underlying OS socket.
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// The address this session was told to dial, or the observed peer
    /// address for inbound sessions.
    pub fn listener_endpoint(&self) -> SocketAddr {
        self.listener_endpoint
    }

    /// Canonical (IPv6-mapped) peer endpoint, once known.
    pub fn remote_endpoint(&self) -> Option<SocketAddr> {
        self.remote_endpoint.get().copied()
    }

    /// Whether the session reached connected. Never reset.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Whether teardown has been claimed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Current position in the session state machine.
    pub fn state(&self) -> SessionState {
        if self.is_disposed() {
            SessionState::Disconnected
        } else if self.is_connected() {
            SessionState::Connected
        } else {
            SessionState::Created
        }
    }
}

impl<M, C> fmt::Debug for Session<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("direction", &self.direction)
            .field("listener_endpoint", &self.listener_endpoint)
            .field("remote_endpoint", &self.remote_endpoint.get())
            .field("connected", &self.connected.load(Ordering::Acquire))
            .field("disposed", &self.disposed.load(Ordering::Acquire))
            .finish()
    }
}

// Connect/send/receive paths need real sockets and are covered in the
// acceptance tests.
