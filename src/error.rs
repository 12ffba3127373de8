//! Error taxonomy for transport bootstrap operations.
//!
//! # Design Decisions
//! - One variant per failure site so callers can match precisely
//! - Every OS-level variant carries the underlying `io::Error` as source
//! - Resolution failure is distinct from all socket-level failures: no
//!   descriptor exists yet on that path

use std::net::SocketAddr;
use thiserror::Error;

/// Failures surfaced by listener setup, handle wrapping and accept.
///
/// Every failure is also logged at the point it is detected, with the
/// operation name and OS error, before being returned.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Hostname could not be resolved to an IPv4 address.
    #[error("unable to resolve host {host:?}: {source}")]
    Resolution {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Stream socket creation failed, or the new descriptor collided with
    /// one of the standard streams (stdin/stdout/stderr).
    #[error("unable to create listener socket: {0}")]
    SocketCreation(#[source] std::io::Error),

    /// Bind failed (port already in use or insufficient permissions).
    #[error("unable to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Listen failed on a bound socket.
    #[error("unable to listen (backlog {backlog}): {source}")]
    Listen {
        backlog: i32,
        #[source]
        source: std::io::Error,
    },

    /// The locally bound address could not be queried after listen.
    #[error("unable to query local listener address: {0}")]
    LocalAddrQuery(#[source] std::io::Error),

    /// The remote peer address of an accepted socket could not be queried.
    #[error("unable to query remote peer address: {0}")]
    PeerAddrQuery(#[source] std::io::Error),

    /// Accept failed (listener closed, interrupted or resource exhaustion).
    #[error("unable to accept connection: {0}")]
    Accept(#[source] std::io::Error),
}
