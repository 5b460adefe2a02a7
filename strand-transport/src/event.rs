//! Notifications to the owning registry.

use crate::session::SessionId;

/// Event delivered to the session's owner.
///
/// Sent on the unbounded channel supplied at construction, so delivery
/// never blocks a teardown path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session was torn down. Sent exactly once, by whichever path
    /// (explicit disconnect, I/O error, deadline) claimed the disposal.
    Disconnected {
        /// The session that went away.
        session: SessionId,
        /// Whether the disconnection was error-triggered.
        error: bool,
    },
}
