use crate::id::ItemId;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// An item as it appears in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Omitted until the store has assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(default)]
    pub name: String,
}

/// Client-supplied item fields for create and update requests.
///
/// The identifier is owned by the store, so an `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub name: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Attach the identifier the store assigned on insert.
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id: Some(id),
            name: self.name,
        }
    }
}

/// Storage layout of an item inside the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub name: String,
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Item {
            id: doc.id.map(ItemId::from),
            name: doc.name,
        }
    }
}

impl From<&NewItem> for ItemDocument {
    fn from(item: &NewItem) -> Self {
        ItemDocument {
            id: None,
            name: item.name.clone(),
        }
    }
}
