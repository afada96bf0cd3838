//! Item identifiers.
//!
//! Items are keyed by the store's 12-byte ObjectId. On the wire and in URL
//! paths the identifier is always its 24-character hexadecimal form.

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of the textual form of an [`ItemId`].
pub const ID_HEX_LEN: usize = 24;

/// Returned when a string is not a well-formed item identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid ID format")]
pub struct InvalidIdentifier;

/// Store-assigned identifier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(ObjectId);

impl ItemId {
    /// Parse the 24-character hexadecimal form.
    ///
    /// Upper- and lowercase digits are both accepted; anything else,
    /// including surrounding whitespace, is rejected.
    pub fn parse(text: &str) -> Result<Self, InvalidIdentifier> {
        if text.len() != ID_HEX_LEN || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidIdentifier);
        }
        ObjectId::parse_str(text)
            .map(ItemId)
            .map_err(|_| InvalidIdentifier)
    }

    /// Lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Mint a fresh identifier. Only stores call this.
    pub(crate) fn generate() -> Self {
        ItemId(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ItemId {
    fn from(oid: ObjectId) -> Self {
        ItemId(oid)
    }
}

impl From<ItemId> for ObjectId {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl FromStr for ItemId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemId::parse(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ItemId::parse(&text).map_err(serde::de::Error::custom)
    }
}
