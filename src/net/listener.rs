//! Listener creation and the accept operation.
//!
//! # Responsibilities
//! - Bootstrap a listener: resolve, create, bind, listen, wrap, register
//! - Embed externally-created sockets as handles
//! - Wrap accept(2) for the upstream accept loop

use std::sync::Arc;

use socket2::Socket;

use crate::context::TransportContext;
use crate::error::TransportError;
use crate::net::connection::Connection;
use crate::net::socket;

/// Entry points for creating listener-side connection handles.
pub struct Listener;

impl Listener {
    /// Create a listener bound to `host:port` and wrap it as a registered
    /// main-listener handle.
    ///
    /// The backlog comes from the context's configuration. An empty or
    /// unparsable `port` requests an OS-assigned ephemeral port. The handle
    /// records the resolved bind address and the port actually bound, so an
    /// ephemeral request yields the OS-assigned port, not "0".
    pub fn bind(
        ctx: &Arc<TransportContext>,
        host: &str,
        port: &str,
    ) -> Result<Arc<Connection>, TransportError> {
        let (socket, local) = socket::create_listener_socket(host, port, ctx.backlog())?;
        Ok(Connection::listener(
            ctx,
            socket,
            &local.ip().to_string(),
            &local.port().to_string(),
        ))
    }

    /// Create a listener using the bind address and backlog from the
    /// context's configuration.
    pub fn bind_configured(ctx: &Arc<TransportContext>) -> Result<Arc<Connection>, TransportError> {
        let (host, port) = {
            let listener = &ctx.config().listener;
            (listener.host.clone(), listener.port.clone())
        };
        Self::bind(ctx, &host, &port)
    }

    /// Wrap an already-open, externally-created socket as a registered
    /// handle, recording the remote peer as its address.
    pub fn from_socket(
        ctx: &Arc<TransportContext>,
        socket: Socket,
    ) -> Result<Arc<Connection>, TransportError> {
        Connection::accepted(ctx, socket)
    }
}

/// Block until a pending connection exists on `listener`, then return the
/// accepted peer socket.
///
/// Pure wrapper over accept(2): no retry policy lives here. Interrupts,
/// resource exhaustion and a listener shut down from another thread all
/// surface as [`TransportError::Accept`] for the caller's loop to handle.
pub fn accept_socket(listener: &Socket) -> Result<Socket, TransportError> {
    let (peer, _addr) = listener.accept().map_err(TransportError::Accept)?;
    Ok(peer)
}
