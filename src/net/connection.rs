//! Connection handle and lifecycle.
//!
//! # Responsibilities
//! - Wrap listener and accepted sockets in a uniform handle
//! - Tag each handle with its role within the protocol stack
//! - Track a logical reference count tied to registry membership
//!
//! # Design Decisions
//! - A handle is registered with its context before its creator ever sees
//!   it, so registry enumeration never under-counts live connections
//! - The socket is owned exclusively by its handle; it closes when the last
//!   `Arc` to the handle drops
//! - `release()` at count zero deregisters; `Arc` covers memory safety,
//!   the logical count covers registry membership

use std::io;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use socket2::Socket;

use crate::context::TransportContext;
use crate::error::TransportError;
use crate::net::io::{RawSocketIo, SocketIo};
use crate::net::listener;

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A handle's function within the protocol stack.
///
/// Other roles (initiating client, TLS variants) live in the layers above;
/// this core only produces the two listener-side roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The primary listening socket accepting inbound connections.
    MainListener,
    /// A connection produced by accepting on a main listener.
    Accepted,
}

/// Uniform handle over a listener or accepted socket.
///
/// Created only through [`Connection::listener`] and
/// [`Connection::accepted`]; both register the handle with the owning
/// context before returning it.
pub struct Connection {
    id: ConnectionId,
    socket: Socket,
    role: Role,
    ctx: Weak<TransportContext>,
    host: String,
    port: String,
    refs: AtomicU32,
    io: Arc<dyn SocketIo>,
}

impl Connection {
    /// Wrap a bound, listening socket as a main-listener handle.
    ///
    /// Host and port are recorded from the caller's input. Registration
    /// happens before the handle is returned.
    pub fn listener(
        ctx: &Arc<TransportContext>,
        socket: Socket,
        host: &str,
        port: &str,
    ) -> Arc<Self> {
        let conn = Arc::new(Self {
            id: ConnectionId::new(),
            socket,
            role: Role::MainListener,
            ctx: Arc::downgrade(ctx),
            host: host.to_string(),
            port: port.to_string(),
            refs: AtomicU32::new(1),
            io: Arc::new(RawSocketIo),
        });

        ctx.register(Arc::clone(&conn));
        tracing::debug!(id = %conn.id, host, port, "registered main listener handle");
        conn
    }

    /// Wrap an already-accepted socket as an accepted-connection handle.
    ///
    /// Host and port are taken from the remote peer address; failing to
    /// query it fails the wrap and closes the socket.
    pub fn accepted(
        ctx: &Arc<TransportContext>,
        socket: Socket,
    ) -> Result<Arc<Self>, TransportError> {
        let peer = socket
            .peer_addr()
            .map_err(|e| {
                tracing::error!(error = %e, "unable to get remote hostname and port");
                TransportError::PeerAddrQuery(e)
            })?
            .as_socket()
            .ok_or_else(|| {
                TransportError::PeerAddrQuery(io::Error::other(
                    "peer address is not an inet address",
                ))
            })?;

        let conn = Arc::new(Self {
            id: ConnectionId::new(),
            socket,
            role: Role::Accepted,
            ctx: Arc::downgrade(ctx),
            host: peer.ip().to_string(),
            port: peer.port().to_string(),
            refs: AtomicU32::new(1),
            io: Arc::new(RawSocketIo),
        });

        ctx.register(Arc::clone(&conn));
        tracing::debug!(id = %conn.id, peer = %peer, "registered accepted connection handle");
        Ok(conn)
    }

    /// This handle's unique ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// This handle's role within the protocol stack.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Host string: the bind host for listeners, the peer address for
    /// accepted connections. Always populated.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port string: the requested port for listeners, the peer's numeric
    /// port for accepted connections. Always populated.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// The underlying socket. Exclusively owned by this handle.
    pub fn socket(&self) -> &Socket {
        &self.socket
    }

    /// The installed send/receive strategy.
    pub fn io(&self) -> &Arc<dyn SocketIo> {
        &self.io
    }

    /// Current logical reference count.
    pub fn ref_count(&self) -> u32 {
        self.refs.load(Ordering::SeqCst)
    }

    /// Take an additional logical reference.
    pub fn retain(&self) {
        self.refs.fetch_add(1, Ordering::SeqCst);
    }

    /// Drop one logical reference. At zero the handle leaves the context
    /// registry; the socket closes once the last `Arc` drops.
    pub fn release(&self) {
        if self.refs.fetch_sub(1, Ordering::SeqCst) == 1 {
            if let Some(ctx) = self.ctx.upgrade() {
                ctx.unregister(self.id);
            }
            tracing::trace!(id = %self.id, "connection released");
        }
    }

    /// Block until a pending connection arrives on this listener and return
    /// the accepted peer socket.
    pub fn accept(&self) -> Result<Socket, TransportError> {
        listener::accept_socket(&self.socket)
    }

    /// Shut the socket down both ways.
    ///
    /// Unblocks an `accept` or `receive` running on another thread; the
    /// blocked call observes a normal error return.
    pub fn shutdown(&self) {
        let _ = self.socket.shutdown(std::net::Shutdown::Both);
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("refs", &self.ref_count())
            .finish()
    }
}
