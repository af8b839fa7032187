use std::sync::Arc;

use crate::config::RelayConfig;
use crate::relay::RelayEngine;
use crate::session::SessionStore;
use crate::video::VideoClient;

/// Shared application state accessible to all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub engine: Arc<RelayEngine>,
    pub store: Arc<dyn SessionStore>,
    pub video: Arc<VideoClient>,
    /// Shared client for one-shot vendor calls (bot verification)
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        config: Arc<RelayConfig>,
        engine: Arc<RelayEngine>,
        store: Arc<dyn SessionStore>,
        video: Arc<VideoClient>,
    ) -> Self {
        Self {
            config,
            engine,
            store,
            video,
            http: reqwest::Client::new(),
        }
    }
}
