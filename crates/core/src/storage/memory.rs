//! In-memory table store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BatchOutcome, ItemKey, Result, StorageItem, TableStore};

/// In-memory storage backend for testing.
///
/// Uses a `BTreeMap` wrapped in `Arc<RwLock<_>>` for thread-safe access;
/// the ordered map gives scans a deterministic key order. Data is not
/// persisted and will be lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    items: Arc<RwLock<BTreeMap<ItemKey, StorageItem>>>,
}

impl MemoryTableStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns true when the table holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Returns a copy of every stored item, in key order.
    pub async fn snapshot(&self) -> Vec<StorageItem> {
        self.items.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn get_item(&self, key: &ItemKey) -> Result<Option<StorageItem>> {
        let items = self.items.read().await;
        Ok(items.get(key).cloned())
    }

    async fn scan_keys(&self) -> Result<Vec<ItemKey>> {
        let items = self.items.read().await;
        Ok(items.keys().cloned().collect())
    }

    async fn batch_put(&self, to_put: &[StorageItem]) -> Result<BatchOutcome> {
        let mut items = self.items.write().await;
        for item in to_put {
            items.insert(item.key.clone(), item.clone());
        }
        Ok(BatchOutcome::Complete)
    }

    async fn batch_delete(&self, keys: &[ItemKey]) -> Result<BatchOutcome> {
        let mut items = self.items.write().await;
        for key in keys {
            items.remove(key);
        }
        Ok(BatchOutcome::Complete)
    }
}
