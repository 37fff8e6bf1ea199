//! `UtttServer` builder and accept loop.
//!
//! This is the entry point for running a game server. It ties together
//! all the layers: transport → protocol → session → room.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uttt_protocol::JsonCodec;
use uttt_room::{RoomConfig, RoomManager};
use uttt_session::{MatchmakingQueue, SessionRegistry};
use uttt_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::{ServerConfig, UtttError};

/// Shared server state passed to each connection handler task.
///
/// The registry sits behind one lock: joins, pairings and disconnects are
/// applied one at a time across all sessions.
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<SessionRegistry>,
    pub(crate) codec: JsonCodec,
    pub(crate) idle_timeout: Option<Duration>,
}

/// Builder for configuring and starting a server.
///
/// # Example
///
/// ```rust,no_run
/// use uttt::prelude::*;
///
/// # async fn run() -> Result<(), UtttError> {
/// let server = UtttServerBuilder::new()
///     .config(ServerConfig::from_env()?)
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct UtttServerBuilder {
    config: ServerConfig,
}

impl UtttServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the listener and assembles the server.
    ///
    /// # Errors
    /// Returns [`UtttError::Config`] for a zero room channel size, or a
    /// transport error if the address cannot be bound.
    pub async fn build(self) -> Result<UtttServer, UtttError> {
        if self.config.room_channel_size == 0 {
            return Err(UtttError::Config(
                "room_channel_size must be at least 1".into(),
            ));
        }

        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let rooms = RoomManager::new(RoomConfig {
            channel_size: self.config.room_channel_size,
        });
        let state = Arc::new(ServerState {
            registry: Mutex::new(SessionRegistry::new(MatchmakingQueue::new(), rooms)),
            codec: JsonCodec,
            idle_timeout: self.config.idle_timeout,
        });

        Ok(UtttServer { transport, state })
    }
}

impl Default for UtttServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound game server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct UtttServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl UtttServer {
    /// Creates a new builder.
    pub fn builder() -> UtttServerBuilder {
        UtttServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop.
    ///
    /// Spawns a handler task for each connection. A failed accept is
    /// logged and the loop carries on. Runs until the process is
    /// terminated.
    pub async fn run(mut self) -> Result<(), UtttError> {
        tracing::info!("uttt server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                }
            }
        }
    }
}
