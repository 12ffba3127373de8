//! Listening socket factory.
//!
//! # Responsibilities
//! - Create a blocking IPv4 stream socket
//! - Apply address-reuse where the platform's semantics are safe
//! - Bind, listen with the configured backlog, report the bound address
//!
//! # Design Decisions
//! - Every failure path closes the descriptor; `Socket`'s `Drop` makes the
//!   close-on-failure policy uniform across bind, listen and the final
//!   local-address query
//! - A descriptor numbered 0..=2 is refused: it would alias a standard
//!   stream in a process that started with them closed

use std::io;
use std::net::{SocketAddr, SocketAddrV4};
#[cfg(unix)]
use std::os::fd::AsRawFd;

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::TransportError;
use crate::net::resolver;

/// Convert textual port to a 16-bit port number.
///
/// Empty or unparsable text yields 0, which requests an OS-assigned
/// ephemeral port at bind time. Callers see that behavior, they do not get
/// an error.
pub(crate) fn parse_port(port: &str) -> u16 {
    port.parse().unwrap_or(0)
}

/// Create an open, bound, listening socket for `host:port` and report the
/// address it actually bound to.
///
/// On any failure the descriptor allocated so far (if any) is closed before
/// the error is returned.
pub fn create_listener_socket(
    host: &str,
    port: &str,
    backlog: i32,
) -> Result<(Socket, SocketAddr), TransportError> {
    let ip = resolver::resolve_ipv4(host)?;

    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).map_err(|e| {
        tracing::debug!(error = %e, "failed to create listener socket");
        TransportError::SocketCreation(e)
    })?;

    // Do not allow a listener on a descriptor reusing stdin (0), stdout (1)
    // or stderr (2).
    #[cfg(unix)]
    if socket.as_raw_fd() <= 2 {
        let fd = socket.as_raw_fd();
        tracing::debug!(fd, "listener socket collides with a standard stream");
        return Err(TransportError::SocketCreation(io::Error::other(format!(
            "descriptor {} collides with a standard stream",
            fd
        ))));
    }

    // Skipped on Windows, where SO_REUSEADDR lets two processes bind the
    // same address:port simultaneously. On Unix it only lets consecutive
    // processes rebind without waiting out TIME_WAIT.
    #[cfg(not(windows))]
    if let Err(e) = socket.set_reuse_address(true) {
        tracing::warn!(error = %e, "could not set SO_REUSEADDR; continuing without it");
    }

    let addr = SocketAddr::V4(SocketAddrV4::new(ip, parse_port(port)));
    if let Err(e) = socket.bind(&addr.into()) {
        tracing::debug!(
            %addr,
            error = %e,
            "unable to bind address (port already in use or insufficient permissions)"
        );
        return Err(TransportError::Bind { addr, source: e });
    }

    if let Err(e) = socket.listen(backlog) {
        tracing::error!(backlog, error = %e, "an error occurred while executing listen");
        return Err(TransportError::Listen { backlog, source: e });
    }

    // The bound address is reported at startup; treat not being able to see
    // it as a failure of the whole operation.
    let local = socket
        .local_addr()
        .map_err(TransportError::LocalAddrQuery)?
        .as_socket()
        .ok_or_else(|| {
            TransportError::LocalAddrQuery(io::Error::other("bound address is not an inet address"))
        })?;

    tracing::debug!(addr = %local, "running listener");
    Ok((socket, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_text_parses_or_falls_back_to_zero() {
        assert_eq!(parse_port("8080"), 8080);
        assert_eq!(parse_port(""), 0);
        assert_eq!(parse_port("not-a-port"), 0);
        // Out of 16-bit range counts as invalid, not truncated.
        assert_eq!(parse_port("70000"), 0);
    }

    #[test]
    fn ephemeral_listener_reports_assigned_port() {
        let (socket, local) = create_listener_socket("127.0.0.1", "0", 8).unwrap();
        assert_ne!(local.port(), 0);
        assert!(local.ip().is_loopback());
        // The reported address is the one the socket is actually bound to.
        assert_eq!(socket.local_addr().unwrap().as_socket().unwrap(), local);
    }

    #[test]
    fn second_bind_to_same_port_fails_with_bind_error() {
        let (_first, local) = create_listener_socket("127.0.0.1", "0", 8).unwrap();
        let port = local.port().to_string();

        let err = create_listener_socket("127.0.0.1", &port, 8).unwrap_err();
        assert!(matches!(err, TransportError::Bind { .. }));
    }

    #[test]
    fn resolution_failure_creates_no_socket() {
        let err = create_listener_socket("", "0", 8).unwrap_err();
        assert!(matches!(err, TransportError::Resolution { .. }));
    }
}
