use thiserror::Error;

/// Errors that can occur during table store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store is unreachable or misconfigured (endpoint, credentials).
    /// Fatal, no partial progress is possible before it occurs.
    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Throttled: {0}")]
    Throttled(String),

    /// A bulk request was accepted only in part. Never coalesced into
    /// success: the reconciler treats it as a failed batch.
    #[error("Bulk request left {unprocessed} of {requested} operations unprocessed")]
    PartialBatch { requested: usize, unprocessed: usize },

    /// Key enumeration ended before covering the full key space. Fatal to
    /// the scanning phase: an incomplete delete set would leave stale items
    /// coexisting with the reloaded seed data.
    #[error("Scan ended before covering the full key space: {0}")]
    ScanIncomplete(String),

    #[error("Invalid item data: {0}")]
    Data(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Result type for table store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
