//! MongoDB-backed item store.

use super::{ItemStore, StoreError, StoreResult};
use crate::id::ItemId;
use crate::model::{Item, ItemDocument, NewItem};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Items stored as documents in a single MongoDB collection.
///
/// The driver pools connections internally; cloning the handles is cheap
/// and every request shares the same pool.
pub struct MongoStore {
    database: Database,
    collection: Collection<ItemDocument>,
}

impl MongoStore {
    /// Build a client for `uri` and bind to `database.collection`.
    ///
    /// Client construction (URI parsing, SRV lookup) must finish within
    /// `connect_timeout`. The server itself is pinged once afterwards; an
    /// unreachable server is logged but not fatal, since the driver
    /// reconnects on demand.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        connect_timeout: Duration,
    ) -> StoreResult<Self> {
        let build = async {
            let mut options = ClientOptions::parse(uri).await?;
            options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
            options.connect_timeout = Some(connect_timeout);
            Client::with_options(options)
        };

        let client = tokio::time::timeout(connect_timeout, build)
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "connecting to store timed out after {}ms",
                    connect_timeout.as_millis()
                ))
            })??;

        let database = client.database(database);
        let store = Self {
            collection: database.collection::<ItemDocument>(collection),
            database,
        };

        match tokio::time::timeout(connect_timeout, store.ping()).await {
            Ok(Ok(())) => tracing::info!(
                database = %store.database.name(),
                collection = %store.collection.name(),
                "Connected to MongoDB"
            ),
            Ok(Err(err)) => tracing::warn!(error = %err, "MongoDB ping failed at startup"),
            Err(_) => tracing::warn!("MongoDB ping timed out at startup"),
        }

        Ok(store)
    }
}

#[async_trait]
impl ItemStore for MongoStore {
    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        let cursor = self.collection.find(None, None).await?;
        let docs: Vec<ItemDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: ItemId) -> StoreResult<Item> {
        self.collection
            .find_one(doc! { "_id": id.as_object_id() }, None)
            .await?
            .map(Item::from)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, item: &NewItem) -> StoreResult<ItemId> {
        let result = self
            .collection
            .insert_one(ItemDocument::from(item), None)
            .await?;
        result
            .inserted_id
            .as_object_id()
            .map(ItemId::from)
            .ok_or(StoreError::AssignmentFailure)
    }

    async fn replace_by_id(&self, id: ItemId, item: &NewItem) -> StoreResult<()> {
        self.collection
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! { "$set": { "name": item.name.as_str() } },
                None,
            )
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        self.collection
            .delete_one(doc! { "_id": id.as_object_id() }, None)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
