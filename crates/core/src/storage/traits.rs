use async_trait::async_trait;

use super::{ItemKey, Result, StorageItem};

/// Maximum number of operations the store accepts in one bulk request.
pub const MAX_BATCH_OPERATIONS: usize = 25;

/// Outcome of a bulk put or delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every requested operation was applied.
    Complete,
    /// The store accepted only part of the request, e.g. under throttling.
    /// Callers must not treat this as success.
    Partial {
        /// Keys of the operations that were not applied.
        unprocessed: Vec<ItemKey>,
    },
}

/// Contract over the key-value table consumed by the reconciler.
///
/// Implementations are thin adapters over the backend's point lookup, full
/// scan, and bulk write/delete operations.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Point lookup by composite key.
    async fn get_item(&self, key: &ItemKey) -> Result<Option<StorageItem>>;

    /// Enumerates every `(partition_key, sort_key)` pair in the table.
    ///
    /// Implementations over paginated backends must drain every page before
    /// returning; a partial enumeration must surface as
    /// [`StoreError::ScanIncomplete`](super::StoreError::ScanIncomplete)
    /// rather than a short result.
    async fn scan_keys(&self) -> Result<Vec<ItemKey>>;

    /// Writes up to [`MAX_BATCH_OPERATIONS`] items in one bulk request.
    async fn batch_put(&self, items: &[StorageItem]) -> Result<BatchOutcome>;

    /// Deletes up to [`MAX_BATCH_OPERATIONS`] keys in one bulk request.
    async fn batch_delete(&self, keys: &[ItemKey]) -> Result<BatchOutcome>;
}
