//! Bulk upsert reconciliation
//!
//! A batch of phrase/value pairs is trimmed, stripped of blank phrases,
//! deduplicated (last occurrence wins) and written to the store in
//! fixed-size chunks. Each chunk is one atomic `upsert_many` call; the
//! store's upsert-on-conflict is the only thing that orders concurrent
//! writers. Reconciliation never deletes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ExError, GematriaError, Result};
use crate::model::NewEntry;
use crate::ops::EntryStore;

/// Rows per atomic store call unless configured otherwise
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Counters describing one reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Input length before any filtering
    pub requested: u64,
    /// Distinct non-empty phrases after dedup
    pub unique: u64,
    /// Rows affected as reported by the store
    pub upserted: u64,
}

/// Trim phrases, drop blanks and keep the last value per phrase.
///
/// Output order follows each phrase's first appearance in the input.
pub fn dedup_last_wins(batch: &[NewEntry]) -> Vec<NewEntry> {
    let mut position: HashMap<String, usize> = HashMap::with_capacity(batch.len());
    let mut rows: Vec<NewEntry> = Vec::with_capacity(batch.len());

    for item in batch {
        let phrase = item.phrase.trim();
        if phrase.is_empty() {
            continue;
        }
        match position.get(phrase) {
            Some(&idx) => rows[idx].value = item.value,
            None => {
                position.insert(phrase.to_string(), rows.len());
                rows.push(NewEntry {
                    phrase: phrase.to_string(),
                    value: item.value,
                });
            }
        }
    }

    rows
}

/// Applies batches to an `EntryStore` in chunks
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    chunk_size: usize,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Reconciler {
    /// Reconciler with a custom chunk size
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(GematriaError::InvalidChunkSize.into());
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Deduplicate `batch` and upsert it chunk by chunk.
    ///
    /// # Errors
    ///
    /// The first failing chunk aborts the run. The returned error keeps
    /// the store's kind and records the chunk index plus the rows that
    /// earlier chunks already committed.
    pub fn reconcile(&self, store: &dyn EntryStore, batch: &[NewEntry]) -> Result<ReconcileReport> {
        let rows = dedup_last_wins(batch);
        let mut report = ReconcileReport {
            requested: batch.len() as u64,
            unique: rows.len() as u64,
            upserted: 0,
        };

        for (chunk_index, chunk) in rows.chunks(self.chunk_size).enumerate() {
            let affected = store.upsert_many(chunk).map_err(|err| {
                chunk_failure(err, chunk_index, report.upserted)
            })?;
            report.upserted += affected;

            tracing::debug!(
                chunk_index,
                rows = chunk.len(),
                affected,
                "reconcile chunk applied"
            );
        }

        Ok(report)
    }
}

fn chunk_failure(err: ExError, chunk_index: usize, rows_committed: u64) -> ExError {
    ExError::new(err.kind())
        .with_op("reconcile")
        .with_message(format!("chunk {} failed: {}", chunk_index, err.message()))
        .with_chunk(chunk_index, rows_committed)
        .with_source(err)
}

/// Reconcile with the default chunk size
///
/// # Errors
///
/// See [`Reconciler::reconcile`].
pub fn reconcile(store: &dyn EntryStore, batch: &[NewEntry]) -> Result<ReconcileReport> {
    Reconciler::default().reconcile(store, batch)
}
