//! Shared utilities for integration testing.

use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use portico::{Connection, TransportConfig, TransportContext};

/// Build a context with a loopback bind and the given backlog.
pub fn test_context(backlog: i32) -> Arc<TransportContext> {
    let mut config = TransportConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.backlog = backlog;
    TransportContext::new(config)
}

/// The loopback address a listener handle is actually bound to.
pub fn bound_addr(conn: &Connection) -> SocketAddr {
    conn.socket()
        .local_addr()
        .expect("listener has a local address")
        .as_socket()
        .expect("listener address is inet")
}

/// Connect to a listener with a timeout so a broken listener fails the
/// test instead of hanging it.
pub fn connect(addr: SocketAddr) -> TcpStream {
    TcpStream::connect_timeout(&addr, Duration::from_secs(2)).expect("connect to test listener")
}
