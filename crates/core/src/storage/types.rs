use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Composite primary key of a storage item.
///
/// `(partition_key, sort_key)` uniquely identifies an item within the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    /// Pattern: `<ENTITY_TYPE>#<id>`.
    pub partition_key: String,
    /// `PROFILE`, `INFO`, or `STUDENT#<id>` depending on the entity.
    pub sort_key: String,
}

impl ItemKey {
    /// Creates a new composite key.
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }
}

/// Secondary index key pair stored alongside the primary key.
///
/// Enables a second query access pattern (by role, by type, by owning user)
/// without a second table. Always derived solely from the source entity's
/// own fields, never from another item's state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexKey {
    pub partition_key: String,
    pub sort_key: String,
}

impl IndexKey {
    /// Creates a new secondary index key pair.
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }
}

/// A scalar attribute value.
///
/// The table schema has no nested shapes; every payload attribute is a
/// string, a number, or a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarValue {
    S(String),
    N(i64),
    Bool(bool),
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::S(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::S(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::N(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

/// The only persisted shape: one denormalized row of the single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageItem {
    pub key: ItemKey,
    pub index_key: Option<IndexKey>,
    /// Entity-specific payload. A `BTreeMap` keeps attribute ordering
    /// deterministic across projection passes.
    pub attributes: BTreeMap<String, ScalarValue>,
}

impl StorageItem {
    /// Creates an item with no secondary key and no attributes.
    pub fn new(key: ItemKey) -> Self {
        Self {
            key,
            index_key: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the secondary index key pair.
    pub fn with_index_key(mut self, index_key: IndexKey) -> Self {
        self.index_key = Some(index_key);
        self
    }

    /// Adds a payload attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns a string attribute, if present and a string.
    pub fn str_attr(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(ScalarValue::S(s)) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_uniquely_identified_by_pair() {
        let a = ItemKey::new("USER#SE182088", "PROFILE");
        let b = ItemKey::new("USER#SE182088", "PROFILE");
        let c = ItemKey::new("USER#SE182088", "INFO");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_storage_item_builder() {
        let item = StorageItem::new(ItemKey::new("CLASS#C1", "INFO"))
            .with_index_key(IndexKey::new("TYPE#CLASS", "NAME#c1"))
            .with_attr("name", "C1")
            .with_attr("status", 1)
            .with_attr("archived", false);

        assert_eq!(item.str_attr("name"), Some("C1"));
        assert_eq!(item.attributes.get("status"), Some(&ScalarValue::N(1)));
        assert_eq!(
            item.attributes.get("archived"),
            Some(&ScalarValue::Bool(false))
        );
        assert_eq!(item.index_key.unwrap().partition_key, "TYPE#CLASS");
    }
}
