//! Collection gateway.
//!
//! The [`Gateway`] is the only way request handlers reach persisted items.
//! It exposes the five collection operations and bounds every one of them
//! with the configured call deadline. The actual storage lives behind the
//! [`ItemStore`] trait so that the MongoDB driver and the in-memory store
//! are interchangeable.
//!
//! Replace and delete report success even when no document matched the
//! identifier. That mirrors the store's native semantics.

use crate::id::ItemId;
use crate::model::{Item, NewItem};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub mod memory;
#[cfg(feature = "backend-mongo")]
pub mod mongo;

pub use memory::InMemoryStore;
#[cfg(feature = "backend-mongo")]
pub use mongo::MongoStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by a store call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No document has the requested identifier.
    #[error("Item not found")]
    NotFound,

    /// Transport error, driver error, or deadline exceeded.
    #[error("{0}")]
    Unavailable(String),

    /// The store accepted an insert but did not hand back a usable id.
    #[error("Error getting inserted ID")]
    AssignmentFailure,

    /// The requested backend cannot be built.
    #[error("store configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::Unavailable(msg.into())
    }
}

/// Storage operations for the item collection.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items in store order. Empty when the collection is empty.
    async fn list_all(&self) -> StoreResult<Vec<Item>>;

    async fn find_by_id(&self, id: ItemId) -> StoreResult<Item>;

    /// Persist a new item and return the identifier the store assigned.
    async fn insert(&self, item: &NewItem) -> StoreResult<ItemId>;

    /// Overwrite the non-identifier fields of the item with `id`.
    async fn replace_by_id(&self, id: ItemId, item: &NewItem) -> StoreResult<()>;

    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Selects and builds the store behind the gateway.
#[derive(Clone, Debug)]
pub enum BackendConfig {
    /// A MongoDB collection. Requires the `backend-mongo` feature.
    Mongo {
        uri: String,
        database: String,
        collection: String,
    },
    /// Process-local map. Contents vanish on restart.
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn mongo(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        BackendConfig::Mongo {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Open the configured store. The whole connection attempt is bounded
    /// by `connect_timeout`.
    pub async fn connect(&self, connect_timeout: Duration) -> StoreResult<Arc<dyn ItemStore>> {
        match self {
            BackendConfig::InMemory => Ok(Arc::new(InMemoryStore::new())),
            BackendConfig::Mongo {
                uri,
                database,
                collection,
            } => {
                #[cfg(feature = "backend-mongo")]
                {
                    let store =
                        MongoStore::connect(uri, database, collection, connect_timeout).await?;
                    Ok(Arc::new(store))
                }
                #[cfg(not(feature = "backend-mongo"))]
                {
                    let _ = (uri, database, collection, connect_timeout);
                    Err(StoreError::Config(
                        "mongo backend disabled at compile time".to_string(),
                    ))
                }
            }
        }
    }
}

/// Deadline-bounded facade over an [`ItemStore`].
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn ItemStore>,
    call_timeout: Duration,
}

impl Gateway {
    pub fn new(store: Arc<dyn ItemStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub async fn list_all(&self) -> StoreResult<Vec<Item>> {
        self.bounded("list_all", self.store.list_all()).await
    }

    pub async fn find_by_id(&self, id: ItemId) -> StoreResult<Item> {
        self.bounded("find_by_id", self.store.find_by_id(id)).await
    }

    /// Insert `item` and return it with its newly assigned identifier.
    pub async fn insert(&self, item: NewItem) -> StoreResult<Item> {
        let id = self.bounded("insert", self.store.insert(&item)).await?;
        Ok(item.with_id(id))
    }

    pub async fn replace_by_id(&self, id: ItemId, item: &NewItem) -> StoreResult<()> {
        self.bounded("replace_by_id", self.store.replace_by_id(id, item))
            .await
    }

    pub async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        self.bounded("delete_by_id", self.store.delete_by_id(id))
            .await
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.bounded("ping", self.store.ping()).await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(StoreError::NotFound)) => Err(StoreError::NotFound),
            Ok(Err(err)) => {
                tracing::warn!(operation, error = %err, "store call failed");
                Err(err)
            }
            Err(_) => {
                let ms = self.call_timeout.as_millis();
                tracing::warn!(operation, timeout_ms = %ms, "store call timed out");
                Err(StoreError::Unavailable(format!(
                    "{operation} timed out after {ms}ms"
                )))
            }
        }
    }
}
