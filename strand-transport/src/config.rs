//! Session configuration.

use std::time::Duration;

/// Default timeout for establishing an outbound connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default upper bound on a single message write.
///
/// Writes are always bounded, whether or not the caller asked for it: a
/// peer that stops draining its receive buffer must not pin a send forever.
pub const DEFAULT_WRITE_DEADLINE: Duration = Duration::from_secs(10);

/// Configuration for a peer session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Timeout for the OS-level connect handshake.
    pub connect_timeout: Duration,

    /// Fixed deadline applied to every message write.
    pub write_deadline: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_deadline: DEFAULT_WRITE_DEADLINE,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with the default timeouts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the write deadline.
    pub fn with_write_deadline(mut self, deadline: Duration) -> Self {
        self.write_deadline = deadline;
        self
    }
}
