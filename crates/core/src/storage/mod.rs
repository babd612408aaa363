mod error;
mod memory;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use memory::MemoryTableStore;
pub use traits::{BatchOutcome, TableStore, MAX_BATCH_OPERATIONS};
pub use types::{IndexKey, ItemKey, ScalarValue, StorageItem};
