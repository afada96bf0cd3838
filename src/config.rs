use crate::gateway::BackendConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Store connection target
    #[serde(default = "default_store_uri")]
    pub store_uri: String,

    /// Database holding the item collection
    #[serde(default = "default_database")]
    pub database: String,

    /// Item collection name
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Storage backend: "mongo" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Server bind address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Deadline for each store operation, in milliseconds
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,

    /// Deadline for the initial store connection, in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            store_uri: default_store_uri(),
            database: default_database(),
            collection: default_collection(),
            backend: default_backend(),
            listen_addr: default_listen_addr(),
            call_timeout_ms: default_call_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `ITEM_SERVER__*` environment variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is the normal case outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("ITEM_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.backend_config()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listen_addr.parse()?)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }

    /// Translate the `backend` setting into a buildable store description.
    pub fn backend_config(&self) -> anyhow::Result<BackendConfig> {
        match self.backend.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(BackendConfig::mongo(
                &self.store_uri,
                &self.database,
                &self.collection,
            )),
            "memory" | "in_memory" => Ok(BackendConfig::in_memory()),
            other => anyhow::bail!("unknown backend '{other}', expected 'mongo' or 'memory'"),
        }
    }
}

fn default_store_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "itemdb".to_string()
}

fn default_collection() -> String {
    "items".to_string()
}

fn default_backend() -> String {
    "mongo".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_call_timeout_ms() -> u64 {
    5_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
