use super::{ItemStore, StoreError, StoreResult};
use crate::id::ItemId;
use crate::model::{Item, NewItem};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// An in-memory store using a `RwLock` around an ordered map.
///
/// Identifiers are minted the same way the document store mints them, so
/// they sort by creation time and `list_all` returns insertion order.
pub struct InMemoryStore {
    items: RwLock<BTreeMap<ItemId, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::unavailable("poisoned lock")
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        let guard = self.items.read().map_err(poisoned)?;
        Ok(guard
            .iter()
            .map(|(id, name)| Item {
                id: Some(*id),
                name: name.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: ItemId) -> StoreResult<Item> {
        let guard = self.items.read().map_err(poisoned)?;
        guard
            .get(&id)
            .map(|name| Item {
                id: Some(id),
                name: name.clone(),
            })
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, item: &NewItem) -> StoreResult<ItemId> {
        let mut guard = self.items.write().map_err(poisoned)?;
        let id = ItemId::generate();
        guard.insert(id, item.name.clone());
        Ok(id)
    }

    async fn replace_by_id(&self, id: ItemId, item: &NewItem) -> StoreResult<()> {
        // Matching nothing is not an error.
        let mut guard = self.items.write().map_err(poisoned)?;
        if let Some(name) = guard.get_mut(&id) {
            *name = item.name.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        self.items.write().map_err(poisoned)?.remove(&id);
        Ok(())
    }
}
