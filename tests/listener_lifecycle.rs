//! Listener bootstrap, registry and reference-count behavior against real
//! loopback sockets.

mod common;

use common::{bound_addr, connect, test_context};
use portico::{Listener, Role, TransportError};

#[test]
fn ephemeral_bind_records_the_os_assigned_port() {
    let ctx = test_context(8);
    let conn = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();

    let local = bound_addr(&conn);
    assert_ne!(local.port(), 0);
    assert_eq!(conn.host(), "127.0.0.1");
    assert_eq!(conn.port(), local.port().to_string());
    assert_eq!(conn.role(), Role::MainListener);
}

#[test]
fn empty_port_requests_an_os_assigned_port() {
    let ctx = test_context(8);
    let conn = Listener::bind(&ctx, "127.0.0.1", "").unwrap();

    let local = bound_addr(&conn);
    assert_ne!(local.port(), 0);
    assert_eq!(conn.port(), local.port().to_string());
}

#[test]
fn registry_count_tracks_creation_and_release() {
    let ctx = test_context(8);
    assert_eq!(ctx.connection_count(), 0);

    let first = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();
    assert_eq!(ctx.connection_count(), 1);

    let second = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();
    assert_eq!(ctx.connection_count(), 2);

    first.release();
    assert_eq!(ctx.connection_count(), 1);
    second.release();
    assert_eq!(ctx.connection_count(), 0);
}

#[test]
fn retain_release_leaves_handle_alive_and_registered() {
    let ctx = test_context(8);
    let conn = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();
    assert_eq!(conn.ref_count(), 1);

    conn.retain();
    conn.release();

    assert_eq!(conn.ref_count(), 1);
    assert_eq!(ctx.connection_count(), 1);
}

#[test]
fn double_bind_to_same_port_fails_with_bind_error() {
    let ctx = test_context(8);
    let first = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();
    let port = bound_addr(&first).port().to_string();

    let err = Listener::bind(&ctx, "127.0.0.1", &port).unwrap_err();
    assert!(matches!(err, TransportError::Bind { .. }));
    // The failed attempt registered nothing.
    assert_eq!(ctx.connection_count(), 1);
}

#[test]
fn resolution_failure_reports_before_any_socket_exists() {
    let ctx = test_context(8);
    let err = Listener::bind(&ctx, "", "0").unwrap_err();
    assert!(matches!(err, TransportError::Resolution { .. }));
    assert_eq!(ctx.connection_count(), 0);
}

#[cfg(target_os = "linux")]
#[test]
fn resolution_failure_leaks_no_descriptor() {
    fn open_fd_count() -> usize {
        std::fs::read_dir("/proc/self/fd").unwrap().count()
    }

    let ctx = test_context(8);
    let before = open_fd_count();
    let _ = Listener::bind(&ctx, "", "0").unwrap_err();
    assert_eq!(open_fd_count(), before);
}

#[test]
fn accepted_wrap_records_peer_address() {
    let ctx = test_context(8);
    let listener = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();

    let client = connect(bound_addr(&listener));
    let peer_socket = listener.accept().unwrap();

    let conn = Listener::from_socket(&ctx, peer_socket).unwrap();
    assert_eq!(conn.role(), Role::Accepted);
    assert_eq!(conn.host(), "127.0.0.1");
    assert_eq!(
        conn.port(),
        client.local_addr().unwrap().port().to_string()
    );
    assert_eq!(ctx.connection_count(), 2);
}

#[test]
fn teardown_releases_all_registered_handles() {
    let ctx = test_context(8);
    let _a = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();
    let _b = Listener::bind(&ctx, "127.0.0.1", "0").unwrap();

    ctx.teardown();
    assert_eq!(ctx.connection_count(), 0);
}
