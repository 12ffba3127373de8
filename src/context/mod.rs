//! Shared execution context.
//!
//! # Responsibilities
//! - Own the validated configuration for the lifetime of the application
//! - Hold the registry of live connection handles
//! - Tear down every registered handle on explicit shutdown
//!
//! # Design Decisions
//! - The registry is a sharded concurrent map, so registration and
//!   deregistration are atomic with respect to enumeration; listeners may
//!   run on multiple threads without extra locking in this core
//! - Handles keep a `Weak` back-reference to the context, so the registry's
//!   strong references never form a cycle

use std::sync::Arc;

use dashmap::DashMap;

use crate::config::TransportConfig;
use crate::net::connection::{Connection, ConnectionId};

/// Process-wide state shared by every connection handle.
///
/// Created once, shared via `Arc`, torn down explicitly with
/// [`TransportContext::teardown`].
pub struct TransportContext {
    config: TransportConfig,
    connections: DashMap<ConnectionId, Arc<Connection>>,
}

impl TransportContext {
    /// Create a context owning the given configuration.
    pub fn new(config: TransportConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            connections: DashMap::new(),
        })
    }

    /// The configuration this context owns.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Configured listen backlog.
    pub fn backlog(&self) -> i32 {
        self.config.listener.backlog
    }

    /// Insert a handle into the live-connection registry.
    ///
    /// Called exactly once per handle, by the handle builders, before the
    /// handle is returned to its creator.
    pub(crate) fn register(&self, conn: Arc<Connection>) {
        let id = conn.id();
        self.connections.insert(id, conn);
        tracing::trace!(%id, live = self.connections.len(), "connection registered");
    }

    /// Remove a handle from the registry. Dropping the registry's strong
    /// reference lets the socket close once no other `Arc` survives.
    pub(crate) fn unregister(&self, id: ConnectionId) {
        if self.connections.remove(&id).is_some() {
            tracing::trace!(%id, live = self.connections.len(), "connection deregistered");
        }
    }

    /// Number of live registered connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Visit every registered handle. Each handle is seen fully formed or
    /// not at all.
    pub fn for_each_connection(&self, mut f: impl FnMut(&Arc<Connection>)) {
        for entry in self.connections.iter() {
            f(entry.value());
        }
    }

    /// Explicit shutdown: shut down and drop every registered handle.
    pub fn teardown(&self) {
        let live = self.connections.len();
        tracing::debug!(live, "tearing down context");
        for entry in self.connections.iter() {
            entry.value().shutdown();
        }
        self.connections.clear();
    }
}

impl std::fmt::Debug for TransportContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportContext")
            .field("backlog", &self.backlog())
            .field("connections", &self.connection_count())
            .finish()
    }
}
