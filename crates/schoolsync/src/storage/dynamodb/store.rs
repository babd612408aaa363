//! DynamoDB table store implementation.
//!
//! Implements the `TableStore` contract from `schoolsync_core::storage`
//! using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;

use schoolsync_core::storage::{BatchOutcome, ItemKey, Result, StorageItem, TableStore};

use super::conversions::{
    attributes_to_item, item_key_from_attributes, item_to_attributes, PARTITION_KEY_ATTR,
    SORT_KEY_ATTR,
};
use super::error::{map_batch_write_error, map_get_item_error, map_scan_error};

/// DynamoDB-backed table store.
pub struct DynamoTableStore {
    client: Client,
    table_name: String,
}

impl DynamoTableStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn put_write_request(item: &StorageItem) -> WriteRequest {
        WriteRequest::builder()
            .put_request(
                PutRequest::builder()
                    .set_item(Some(item_to_attributes(item)))
                    .build()
                    .expect("Failed to build PutRequest"),
            )
            .build()
    }

    fn delete_write_request(key: &ItemKey) -> WriteRequest {
        WriteRequest::builder()
            .delete_request(
                DeleteRequest::builder()
                    .key(
                        PARTITION_KEY_ATTR,
                        AttributeValue::S(key.partition_key.clone()),
                    )
                    .key(SORT_KEY_ATTR, AttributeValue::S(key.sort_key.clone()))
                    .build()
                    .expect("Failed to build DeleteRequest"),
            )
            .build()
    }

    /// Issues one bulk request and reads back which operations the store
    /// left unprocessed, so partial acceptance is never mistaken for
    /// success.
    async fn batch_write(&self, requests: Vec<WriteRequest>) -> Result<BatchOutcome> {
        let result = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .map_err(|e| map_batch_write_error(e, &self.table_name))?;

        let unprocessed: Vec<ItemKey> = result
            .unprocessed_items
            .unwrap_or_default()
            .remove(&self.table_name)
            .unwrap_or_default()
            .iter()
            .filter_map(write_request_key)
            .collect();

        if unprocessed.is_empty() {
            Ok(BatchOutcome::Complete)
        } else {
            Ok(BatchOutcome::Partial { unprocessed })
        }
    }
}

#[async_trait]
impl TableStore for DynamoTableStore {
    async fn get_item(&self, key: &ItemKey) -> Result<Option<StorageItem>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                PARTITION_KEY_ATTR,
                AttributeValue::S(key.partition_key.clone()),
            )
            .key(SORT_KEY_ATTR, AttributeValue::S(key.sort_key.clone()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name))?;

        match result.item {
            Some(attrs) => Ok(Some(attributes_to_item(&attrs)?)),
            None => Ok(None),
        }
    }

    async fn scan_keys(&self) -> Result<Vec<ItemKey>> {
        let mut keys = Vec::new();
        let mut exclusive_start_key = None;

        // A paginated backend returns at most 1MB per page; every page must
        // be drained or the wipe would miss keys.
        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .projection_expression("PK, SK")
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| map_scan_error(e, &self.table_name))?;

            for attrs in result.items.unwrap_or_default() {
                keys.push(item_key_from_attributes(&attrs)?);
            }

            exclusive_start_key = result.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        Ok(keys)
    }

    async fn batch_put(&self, items: &[StorageItem]) -> Result<BatchOutcome> {
        let requests = items.iter().map(Self::put_write_request).collect();
        self.batch_write(requests).await
    }

    async fn batch_delete(&self, keys: &[ItemKey]) -> Result<BatchOutcome> {
        let requests = keys.iter().map(Self::delete_write_request).collect();
        self.batch_write(requests).await
    }
}

/// Recovers the composite key of an unprocessed write request.
fn write_request_key(request: &WriteRequest) -> Option<ItemKey> {
    let attrs = request
        .put_request()
        .map(|put| put.item())
        .or_else(|| request.delete_request().map(|delete| delete.key()))?;

    let pk = attrs.get(PARTITION_KEY_ATTR)?.as_s().ok()?;
    let sk = attrs.get(SORT_KEY_ATTR)?.as_s().ok()?;
    Some(ItemKey::new(pk, sk))
}
