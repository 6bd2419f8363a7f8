//! `MnemoServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → store → engine.
//! One process hosts one store; every room shares the same rules.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use mnemo_engine::{GameConfig, PlayerId};
use mnemo_protocol::{JsonCodec, ServerMessage};
use mnemo_store::RoomStore;
use mnemo_transport::{Transport, WebSocketTransport};
use tokio::sync::{Mutex, mpsc};

use crate::ServerError;
use crate::gateway::handle_connection;

/// Fallback invite-link base when neither a configured front-end URL
/// nor a request Origin header is available.
pub(crate) const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// How long a terminated room stays readable before it is purged.
const DEFAULT_CLEANUP_GRACE: Duration = Duration::from_secs(60);

/// Shared server state passed to each connection handler task.
///
/// The store and the peer registry live behind separate locks and are
/// never held at the same time: handlers commit a transition under the
/// store lock, release it, then take the peers lock to fan out.
pub(crate) struct ServerState {
    pub(crate) store: Mutex<RoomStore>,
    pub(crate) peers:
        Mutex<HashMap<PlayerId, mpsc::UnboundedSender<ServerMessage>>>,
    pub(crate) codec: JsonCodec,
    pub(crate) frontend_url: Option<String>,
    pub(crate) cleanup_grace: Duration,
}

/// Builder for configuring and starting a mnemo server.
///
/// # Example
///
/// ```rust,no_run
/// use mnemo::MnemoServerBuilder;
///
/// # async fn run() -> Result<(), mnemo::ServerError> {
/// let server = MnemoServerBuilder::new()
///     .bind("0.0.0.0:3001")
///     .frontend_url("https://game.example")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct MnemoServerBuilder {
    bind_addr: String,
    game_config: GameConfig,
    frontend_url: Option<String>,
    cleanup_grace: Duration,
}

impl MnemoServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
            game_config: GameConfig::default(),
            frontend_url: None,
            cleanup_grace: DEFAULT_CLEANUP_GRACE,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the scoring and deck-size rules shared by every room.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Sets the front-end base URL used to build invite links. When
    /// unset, the connection's Origin header is used instead.
    pub fn frontend_url(mut self, url: &str) -> Self {
        self.frontend_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Sets how long terminated rooms linger before deletion.
    pub fn cleanup_grace(mut self, grace: Duration) -> Self {
        self.cleanup_grace = grace;
        self
    }

    /// Binds the transport and builds the server.
    pub async fn build(self) -> Result<MnemoServer, ServerError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            store: Mutex::new(RoomStore::new(self.game_config)),
            peers: Mutex::new(HashMap::new()),
            codec: JsonCodec,
            frontend_url: self.frontend_url,
            cleanup_grace: self.cleanup_grace,
        });

        Ok(MnemoServer { transport, state })
    }
}

impl Default for MnemoServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running mnemo game server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct MnemoServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl MnemoServer {
    /// Creates a new builder.
    pub fn builder() -> MnemoServerBuilder {
        MnemoServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Each accepted connection gets its own handler task; the loop
    /// itself runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), ServerError> {
        tracing::info!("mnemo server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
