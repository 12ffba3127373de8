//! Listener-side transport bootstrap for a WebSocket protocol stack.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │              TRANSPORT BOOTSTRAP              │
//!                    │                                               │
//!  Listener::bind    │  ┌──────────┐   ┌────────┐   ┌────────────┐   │
//!  ──────────────────┼─▶│ resolver │──▶│ socket │──▶│ connection │   │
//!                    │  └──────────┘   └────────┘   └─────┬──────┘   │
//!                    │                                    │          │
//!  accept loop       │  ┌──────────┐                      ▼          │
//!  ──────────────────┼─▶│ listener │──────────▶   ┌──────────────┐   │
//!                    │  └──────────┘              │   context    │   │
//!                    │                            │   registry   │   │
//!                    │  ┌────────────────────────┐└──────────────┘   │
//!                    │  │ config │ observability │                   │
//!                    │  └────────────────────────┘                   │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! The crate establishes transport-level connectivity only: it resolves a
//! bind address, creates and configures a listening socket, accepts inbound
//! connections and wraps both in uniform, reference-counted handles
//! registered with a shared [`TransportContext`]. Handshake, framing and
//! message I/O live in the layers above and reach the sockets through the
//! pluggable [`net::io::SocketIo`] strategies.

pub mod config;
pub mod context;
pub mod error;
pub mod net;
pub mod observability;

pub use config::TransportConfig;
pub use context::TransportContext;
pub use error::TransportError;
pub use net::connection::{Connection, ConnectionId, Role};
pub use net::listener::{accept_socket, Listener};
