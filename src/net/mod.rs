//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Listener::bind(host, port)
//!     → resolver.rs (hostname → IPv4 address)
//!     → socket.rs (create, reuse option, bind, listen)
//!     → connection.rs (handle creation, registry insert)
//!
//! accept loop (caller-driven):
//!     listener.rs accept_socket()
//!     → connection.rs (peer lookup, handle creation)
//!     → Hand off to the protocol layer via io.rs strategies
//! ```
//!
//! # Design Decisions
//! - Blocking sockets; callers pick their own threading model
//! - Each socket is exclusively owned by exactly one handle
//! - Registration always precedes handle visibility

pub mod connection;
pub mod io;
pub mod listener;
pub mod resolver;
pub mod socket;
