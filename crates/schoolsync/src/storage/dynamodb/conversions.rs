//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! the storage item model. These are testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use schoolsync_core::storage::{IndexKey, ItemKey, ScalarValue, StorageItem, StoreError};

// ============================================================================
// Table attribute names
// ============================================================================

pub const PARTITION_KEY_ATTR: &str = "PK";
pub const SORT_KEY_ATTR: &str = "SK";
pub const INDEX_PARTITION_KEY_ATTR: &str = "GSI1PK";
pub const INDEX_SORT_KEY_ATTR: &str = "GSI1SK";

// ============================================================================
// StorageItem conversions
// ============================================================================

/// Convert a StorageItem to a DynamoDB item.
pub fn item_to_attributes(item: &StorageItem) -> HashMap<String, AttributeValue> {
    let mut attrs = HashMap::new();

    // Keys
    attrs.insert(
        PARTITION_KEY_ATTR.to_string(),
        AttributeValue::S(item.key.partition_key.clone()),
    );
    attrs.insert(
        SORT_KEY_ATTR.to_string(),
        AttributeValue::S(item.key.sort_key.clone()),
    );
    if let Some(index_key) = &item.index_key {
        attrs.insert(
            INDEX_PARTITION_KEY_ATTR.to_string(),
            AttributeValue::S(index_key.partition_key.clone()),
        );
        attrs.insert(
            INDEX_SORT_KEY_ATTR.to_string(),
            AttributeValue::S(index_key.sort_key.clone()),
        );
    }

    // Payload
    for (name, value) in &item.attributes {
        attrs.insert(name.clone(), scalar_to_attribute(value));
    }

    attrs
}

/// Convert a DynamoDB item to a StorageItem.
pub fn attributes_to_item(
    attrs: &HashMap<String, AttributeValue>,
) -> Result<StorageItem, StoreError> {
    let key = item_key_from_attributes(attrs)?;

    let index_key = match (
        attrs.get(INDEX_PARTITION_KEY_ATTR),
        attrs.get(INDEX_SORT_KEY_ATTR),
    ) {
        (Some(pk), Some(sk)) => Some(IndexKey::new(
            string_value(INDEX_PARTITION_KEY_ATTR, pk)?,
            string_value(INDEX_SORT_KEY_ATTR, sk)?,
        )),
        _ => None,
    };

    let mut item = StorageItem::new(key);
    item.index_key = index_key;

    for (name, value) in attrs {
        if matches!(
            name.as_str(),
            PARTITION_KEY_ATTR | SORT_KEY_ATTR | INDEX_PARTITION_KEY_ATTR | INDEX_SORT_KEY_ATTR
        ) {
            continue;
        }
        item.attributes
            .insert(name.clone(), attribute_to_scalar(name, value)?);
    }

    Ok(item)
}

/// Extract the composite primary key from a DynamoDB item.
pub fn item_key_from_attributes(
    attrs: &HashMap<String, AttributeValue>,
) -> Result<ItemKey, StoreError> {
    let pk = attrs
        .get(PARTITION_KEY_ATTR)
        .ok_or_else(|| missing_attribute(PARTITION_KEY_ATTR))?;
    let sk = attrs
        .get(SORT_KEY_ATTR)
        .ok_or_else(|| missing_attribute(SORT_KEY_ATTR))?;

    Ok(ItemKey::new(
        string_value(PARTITION_KEY_ATTR, pk)?,
        string_value(SORT_KEY_ATTR, sk)?,
    ))
}

// ============================================================================
// Scalar conversions
// ============================================================================

/// Convert a scalar value to a DynamoDB AttributeValue.
pub fn scalar_to_attribute(value: &ScalarValue) -> AttributeValue {
    match value {
        ScalarValue::S(s) => AttributeValue::S(s.clone()),
        ScalarValue::N(n) => AttributeValue::N(n.to_string()),
        ScalarValue::Bool(b) => AttributeValue::Bool(*b),
    }
}

fn attribute_to_scalar(name: &str, value: &AttributeValue) -> Result<ScalarValue, StoreError> {
    if let Ok(s) = value.as_s() {
        return Ok(ScalarValue::S(s.clone()));
    }
    if let Ok(n) = value.as_n() {
        let parsed = n.parse::<i64>().map_err(|_| {
            StoreError::Data(format!(
                "attribute '{name}' has non-integer numeric value '{n}'"
            ))
        })?;
        return Ok(ScalarValue::N(parsed));
    }
    if let Ok(b) = value.as_bool() {
        return Ok(ScalarValue::Bool(*b));
    }

    Err(StoreError::Data(format!(
        "attribute '{name}' has an unsupported non-scalar type"
    )))
}

fn string_value(name: &str, value: &AttributeValue) -> Result<String, StoreError> {
    value
        .as_s()
        .map(Clone::clone)
        .map_err(|_| StoreError::Data(format!("attribute '{name}' is not a string")))
}

fn missing_attribute(name: &str) -> StoreError {
    StoreError::Data(format!("item is missing required attribute '{name}'"))
}
