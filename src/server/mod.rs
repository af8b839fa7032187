pub mod router;
pub mod state;

use std::sync::Arc;

use crate::agent::{AgentBackend, HttpAgentBackend};
use crate::config::{RelayConfig, StoreProvider};
use crate::dirs;
use crate::error::{RelayError, Result};
use crate::relay::RelayEngine;
use crate::session::{MemorySessionStore, NatsKvSessionStore, SessionStore};
use crate::video::VideoClient;

/// Build the configured session store provider.
pub async fn build_store(config: &RelayConfig) -> Result<Arc<dyn SessionStore>> {
    match config.store.provider {
        StoreProvider::Memory => {
            tracing::warn!("Using the in-memory session store; records will not survive restarts");
            Ok(Arc::new(MemorySessionStore::new()))
        }
        StoreProvider::Nats => {
            let store =
                NatsKvSessionStore::connect(&config.store.nats_url, &config.store.bucket).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Start the HTTP server with the given configuration.
pub async fn start(config: RelayConfig) -> Result<()> {
    dirs::ensure_dirs()?;

    let store = build_store(&config).await?;
    tracing::info!(store = store.name(), "Initialized session store");

    let agent: Arc<dyn AgentBackend> = Arc::new(HttpAgentBackend::new(config.agent.clone()));
    let engine = Arc::new(RelayEngine::new(store.clone(), agent));
    let video = Arc::new(VideoClient::new(config.video.clone()));

    let bind_addr = config.bind_address();
    let app_state = state::AppState::new(Arc::new(config), engine, store, video);

    let app = router::build(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| RelayError::Server(format!("Failed to bind to {bind_addr}: {e}")))?;

    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| RelayError::Server(format!("Server error: {e}")))?;

    Ok(())
}
