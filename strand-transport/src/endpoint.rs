//! Peer address normalization.
//!
//! Remote endpoints are stored in canonical IPv6-mapped form regardless of
//! the underlying transport family, so nothing above the session ever
//! branches on address family. The OS socket, on the other hand, wants the
//! de-mapped form: an IPv4-mapped-IPv6 target is dialed as plain IPv4.

use std::fmt;
use std::net::{SocketAddr, SocketAddrV4, SocketAddrV6};

/// Address family of the OS socket backing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Family the OS socket must use to reach `addr`.
    ///
    /// IPv4-mapped-IPv6 addresses classify as `Ipv4`.
    pub fn of(addr: &SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(_) => AddressFamily::Ipv4,
            SocketAddr::V6(v6) if v6.ip().to_ipv4_mapped().is_some() => AddressFamily::Ipv4,
            SocketAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "ipv4"),
            AddressFamily::Ipv6 => write!(f, "ipv6"),
        }
    }
}

/// Canonical IPv6-mapped form of an endpoint.
///
/// IPv4 addresses become their IPv6-mapped equivalent; IPv6 addresses pass
/// through with flow and scope cleared. Idempotent.
pub fn canonical(addr: SocketAddr) -> SocketAddr {
    match addr {
        SocketAddr::V4(v4) => {
            SocketAddr::V6(SocketAddrV6::new(v4.ip().to_ipv6_mapped(), v4.port(), 0, 0))
        }
        SocketAddr::V6(v6) => SocketAddr::V6(SocketAddrV6::new(*v6.ip(), v6.port(), 0, 0)),
    }
}

/// De-mapped form of an endpoint, suitable for the OS connect call.
pub fn dialable(addr: SocketAddr) -> SocketAddr {
    match addr {
        SocketAddr::V6(v6) => match v6.ip().to_ipv4_mapped() {
            Some(v4) => SocketAddr::V4(SocketAddrV4::new(v4, v6.port())),
            None => addr,
        },
        SocketAddr::V4(_) => addr,
    }
}
