//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `schoolsync_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use schoolsync_core::storage::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(connectivity) = connectivity_error(&err) {
        return connectivity;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table_name: table_name.to_string(),
        },
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::Request("DynamoDB internal server error".to_string())
        }
        err => StoreError::Request(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to StoreError.
///
/// A scan failing on any page means the enumeration did not cover the full
/// key space, so throttling aside, failures surface as `ScanIncomplete`.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(connectivity) = connectivity_error(&err) {
        return connectivity;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table_name: table_name.to_string(),
        },
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::Throttled("request limit exceeded, please retry".to_string())
        }
        err => StoreError::ScanIncomplete(format!("Scan failed: {:?}", err)),
    }
}

/// Map a BatchWriteItem SDK error to StoreError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(connectivity) = connectivity_error(&err) {
        return connectivity;
    }
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table_name: table_name.to_string(),
        },
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("throughput exceeded, please retry".to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("request limit exceeded, please retry".to_string())
        }
        BatchWriteItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::Request("item collection size limit exceeded".to_string())
        }
        BatchWriteItemError::InternalServerError(_) => {
            StoreError::Request("DynamoDB internal server error".to_string())
        }
        err => StoreError::Request(format!("BatchWriteItem failed: {:?}", err)),
    }
}

/// Detects failures that never reached the service: wrong endpoint, DNS,
/// timeouts. These surface before any partial progress is possible.
fn connectivity_error<E, R>(err: &SdkError<E, R>) -> Option<StoreError> {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            Some(StoreError::Connectivity(err.to_string()))
        }
        _ => None,
    }
}
