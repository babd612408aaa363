//! Wipe-then-reload reconciliation of a table against a seed set.
//!
//! A run moves through `Idle -> Scanning -> Deleting -> Seeding -> Done`,
//! issuing every bulk request sequentially and awaiting each before the
//! next, so a failure is always attributable to one batch of one phase.
//! This is a destructive development-mode operation: it guarantees the
//! table's end state matches the seed set exactly, at the cost of a
//! transient empty-table window, and it assumes no concurrent writers.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::projection::{batch, project_seed};
use crate::school::SeedSet;
use crate::storage::{BatchOutcome, ItemKey, StorageItem, StoreError, TableStore, MAX_BATCH_OPERATIONS};

/// Phase of a reconciliation run.
///
/// Failure is not a variant here: a failed run surfaces as a
/// [`ReconcileError`] carrying the phase that was active when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scanning,
    Deleting,
    Seeding,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Scanning => "scanning",
            Phase::Deleting => "deleting",
            Phase::Seeding => "seeding",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Totals reported by a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Items removed during the wipe.
    pub deleted: usize,
    /// Items written during the reload.
    pub written: usize,
}

/// A failed run: the phase that was active and the progress made before the
/// failure. Completed batches are not rolled back and nothing is retried;
/// re-running the reconciliation is the caller's responsibility.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "Reconciliation failed while {phase} ({deleted} deleted, {written} written): {source}"
)]
pub struct ReconcileError {
    pub phase: Phase,
    pub deleted: usize,
    pub written: usize,
    #[source]
    pub source: StoreError,
}

/// Orchestrates the destructive wipe-then-reload of one table.
pub struct Reconciler<'a, S: TableStore> {
    store: &'a S,
}

impl<'a, S: TableStore> Reconciler<'a, S> {
    /// Creates a reconciler over the given store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Runs one reconciliation, stamping projected timestamps with the
    /// current wall-clock time.
    pub async fn run(&self, seed: &SeedSet) -> Result<ReconcileReport, ReconcileError> {
        self.run_at(seed, Utc::now()).await
    }

    /// Like [`run`](Self::run), with an explicit projection timestamp.
    pub async fn run_at(
        &self,
        seed: &SeedSet,
        now: DateTime<Utc>,
    ) -> Result<ReconcileReport, ReconcileError> {
        let mut deleted = 0;
        let mut written = 0;

        tracing::info!("scanning existing keys");
        let existing = self
            .store
            .scan_keys()
            .await
            .map_err(|source| fail(Phase::Scanning, deleted, written, source))?;

        if existing.is_empty() {
            tracing::info!("table is empty, nothing to delete");
        } else {
            tracing::info!(total = existing.len(), "deleting existing items");
            for (n, chunk) in batch(&existing, MAX_BATCH_OPERATIONS).into_iter().enumerate() {
                self.delete_batch(chunk)
                    .await
                    .map_err(|source| fail(Phase::Deleting, deleted, written, source))?;
                deleted += chunk.len();
                tracing::debug!(batch = n + 1, deleted, total = existing.len(), "batch deleted");
            }
        }

        let items = project_seed(seed, now);
        tracing::info!(total = items.len(), "writing projected items");
        for (n, chunk) in batch(&items, MAX_BATCH_OPERATIONS).into_iter().enumerate() {
            self.put_batch(chunk)
                .await
                .map_err(|source| fail(Phase::Seeding, deleted, written, source))?;
            written += chunk.len();
            tracing::debug!(batch = n + 1, written, total = items.len(), "batch written");
        }

        tracing::info!(deleted, written, "reconciliation complete");
        Ok(ReconcileReport { deleted, written })
    }

    async fn delete_batch(&self, keys: &[ItemKey]) -> Result<(), StoreError> {
        match self.store.batch_delete(keys).await? {
            BatchOutcome::Complete => Ok(()),
            BatchOutcome::Partial { unprocessed } => Err(StoreError::PartialBatch {
                requested: keys.len(),
                unprocessed: unprocessed.len(),
            }),
        }
    }

    async fn put_batch(&self, items: &[StorageItem]) -> Result<(), StoreError> {
        match self.store.batch_put(items).await? {
            BatchOutcome::Complete => Ok(()),
            BatchOutcome::Partial { unprocessed } => Err(StoreError::PartialBatch {
                requested: items.len(),
                unprocessed: unprocessed.len(),
            }),
        }
    }
}

fn fail(phase: Phase, deleted: usize, written: usize, source: StoreError) -> ReconcileError {
    tracing::error!(%phase, deleted, written, error = %source, "reconciliation failed");
    ReconcileError {
        phase,
        deleted,
        written,
        source,
    }
}
