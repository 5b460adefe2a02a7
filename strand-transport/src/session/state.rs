//! Session state machine.

use std::fmt;

/// State of a session.
///
/// ```text
/// Created --connect success--> Connected --(error|timeout|disconnect)--> Disconnected
/// Created --connect failure------------------------------------------> Disconnected
/// accepted construction ------> Connected
/// ```
///
/// `Disconnected` is absorbing: every operation on a disconnected session
/// is a no-op or a fast failure. `Connected` is entered at most once; a
/// disconnected session is never reconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Outbound session built, connect not yet attempted or completed.
    #[default]
    Created,
    /// Transport is live; send and receive are usable.
    Connected,
    /// Terminal. Resources released, owner notified.
    Disconnected,
}

impl SessionState {
    /// Check if the session reached connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected)
    }

    /// Check if the session is terminally disconnected.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, SessionState::Disconnected)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Created => write!(f, "created"),
            SessionState::Connected => write!(f, "connected"),
            SessionState::Disconnected => write!(f, "disconnected"),
        }
    }
}
