use crate::config::ServerConfig;
use crate::gateway::{Gateway, ItemStore};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Gateway to the item collection (shared across requests)
    pub gateway: Gateway,

    /// When this state was built, for uptime reporting
    pub started_at: Instant,
}

impl ServerState {
    /// Create server state around an already opened store.
    pub fn new(config: ServerConfig, store: Arc<dyn ItemStore>) -> Self {
        let gateway = Gateway::new(store, config.call_timeout());
        Self {
            config: Arc::new(config),
            gateway,
            started_at: Instant::now(),
        }
    }

    /// Open the configured backend and build state around it.
    pub async fn connect(config: ServerConfig) -> anyhow::Result<Self> {
        let backend = config.backend_config()?;
        let store = backend.connect(config.connect_timeout()).await?;
        Ok(Self::new(config, store))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
