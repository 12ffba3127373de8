//! Hostname resolution for bind addresses.
//!
//! # Design Decisions
//! - The first IPv4 result wins; no preference ordering is applied among
//!   multiple results and IPv6 results are skipped. Multi-address policy
//!   belongs to the caller, not this layer.
//! - Resolution failure is distinct from every socket-level failure, and no
//!   descriptor is ever created on this path.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

use crate::error::TransportError;

/// Resolve a hostname or literal address to an IPv4 address usable for
/// binding.
pub fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, TransportError> {
    if host.is_empty() {
        return Err(TransportError::Resolution {
            host: host.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "host must not be empty"),
        });
    }

    // Port 0 here only satisfies ToSocketAddrs; the resolved IP is all we
    // keep.
    let addrs = (host, 0u16).to_socket_addrs().map_err(|e| {
        tracing::error!(host, error = %e, "unable to resolve host");
        TransportError::Resolution {
            host: host.to_string(),
            source: e,
        }
    })?;

    for addr in addrs {
        if let SocketAddr::V4(v4) = addr {
            return Ok(*v4.ip());
        }
    }

    tracing::error!(host, "host resolved, but to no IPv4 address");
    Err(TransportError::Resolution {
        host: host.to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "no IPv4 address for host"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_host_is_a_resolution_failure() {
        let err = resolve_ipv4("").unwrap_err();
        assert!(matches!(err, TransportError::Resolution { .. }));
    }

    #[test]
    fn loopback_literal_resolves() {
        assert_eq!(resolve_ipv4("127.0.0.1").unwrap(), Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn wildcard_literal_resolves() {
        assert_eq!(resolve_ipv4("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn ipv6_only_literal_is_a_resolution_failure() {
        let err = resolve_ipv4("::1").unwrap_err();
        assert!(matches!(err, TransportError::Resolution { .. }));
    }
}
