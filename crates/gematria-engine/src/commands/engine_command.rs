//! Engine-level write commands.

#![allow(clippy::result_large_err)]

use gematria_core::errors::{GematriaError, Result};
use gematria_core::model::{Entry, EntryPatch, NewEntry};
use gematria_core::ops::EntryStore;
use gematria_core::reconcile::{ReconcileReport, Reconciler};
use gematria_core::{log_op_end, log_op_error, log_op_start};

use crate::commands::required_phrase;

/// Engine-level commands that write to the store.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Create a new entry; fails with a conflict if the phrase exists.
    EntryCreate { phrase: String, value: i64 },
    /// Partially update an entry by id.
    EntryUpdate { id: i64, patch: EntryPatch },
    /// Delete an entry by id.
    EntryDelete { id: i64 },
    /// Insert or overwrite the value of a single phrase.
    EntryUpsertByPhrase { phrase: String, value: i64 },
    /// Delete an entry by phrase.
    EntryDeleteByPhrase { phrase: String },
    /// Reconcile a batch of phrase/value pairs.
    BulkUpsert { rows: Vec<NewEntry> },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommandResult {
    Created(Entry),
    Updated(Entry),
    Deleted(Entry),
    Upserted(Entry),
    BulkUpserted(ReconcileReport),
}

/// Apply an engine command against a store.
pub fn apply_engine_command(
    cmd: EngineCommand,
    store: &dyn EntryStore,
    reconciler: &Reconciler,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::EntryCreate { phrase, value } => {
            log_op_start!("entry_create", phrase = phrase.as_str(), value = value);
            let start = std::time::Instant::now();

            let entry = entry_create_impl(store, &phrase, value).map_err(|e| {
                log_op_error!(
                    "entry_create",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

            log_op_end!(
                "entry_create",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_id = entry.id
            );
            Ok(EngineCommandResult::Created(entry))
        }

        EngineCommand::EntryUpdate { id, patch } => {
            log_op_start!("entry_update", entry_id = id);
            let start = std::time::Instant::now();

            let entry = entry_update_impl(store, id, patch).map_err(|e| {
                log_op_error!(
                    "entry_update",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

            log_op_end!(
                "entry_update",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_id = id
            );
            Ok(EngineCommandResult::Updated(entry))
        }

        EngineCommand::EntryDelete { id } => {
            log_op_start!("entry_delete", entry_id = id);
            let start = std::time::Instant::now();

            let result = store.delete_by_id(id).and_then(|deleted| {
                deleted.ok_or_else(|| GematriaError::EntryNotFound { id }.into())
            });
            let entry = result.map_err(|e| {
                log_op_error!(
                    "entry_delete",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

            log_op_end!(
                "entry_delete",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_id = id
            );
            Ok(EngineCommandResult::Deleted(entry))
        }

        EngineCommand::EntryUpsertByPhrase { phrase, value } => {
            log_op_start!("entry_upsert", phrase = phrase.as_str(), value = value);
            let start = std::time::Instant::now();

            let entry = entry_upsert_impl(store, &phrase, value).map_err(|e| {
                log_op_error!(
                    "entry_upsert",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

            log_op_end!(
                "entry_upsert",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_id = entry.id
            );
            Ok(EngineCommandResult::Upserted(entry))
        }

        EngineCommand::EntryDeleteByPhrase { phrase } => {
            log_op_start!("entry_delete_by_phrase", phrase = phrase.as_str());
            let start = std::time::Instant::now();

            let phrase = phrase.trim();
            let result = store.delete_by_phrase(phrase).and_then(|deleted| {
                deleted.ok_or_else(|| {
                    GematriaError::PhraseNotFound {
                        phrase: phrase.to_string(),
                    }
                    .into()
                })
            });
            let entry = result.map_err(|e| {
                log_op_error!(
                    "entry_delete_by_phrase",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

            log_op_end!(
                "entry_delete_by_phrase",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_id = entry.id
            );
            Ok(EngineCommandResult::Deleted(entry))
        }

        EngineCommand::BulkUpsert { rows } => {
            log_op_start!("bulk_upsert", requested = rows.len() as u64);
            let start = std::time::Instant::now();

            let report = reconciler.reconcile(store, &rows).map_err(|e| {
                log_op_error!(
                    "bulk_upsert",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    chunk_index = e.chunk_index().map(|c| c as u64),
                    rows_committed = e.rows_committed()
                );
                e
            })?;

            log_op_end!(
                "bulk_upsert",
                duration_ms = start.elapsed().as_millis() as u64,
                requested = report.requested,
                unique = report.unique,
                upserted = report.upserted
            );
            Ok(EngineCommandResult::BulkUpserted(report))
        }
    }
}

fn entry_create_impl(store: &dyn EntryStore, phrase: &str, value: i64) -> Result<Entry> {
    let phrase = required_phrase(phrase)?;
    store.insert(&NewEntry { phrase, value })
}

fn entry_update_impl(store: &dyn EntryStore, id: i64, mut patch: EntryPatch) -> Result<Entry> {
    if let Some(phrase) = patch.phrase.take() {
        patch.phrase = Some(required_phrase(&phrase)?);
    }

    if patch.is_empty() {
        return store
            .get_by_id(id)?
            .ok_or_else(|| GematriaError::EntryNotFound { id }.into());
    }

    store
        .update(id, &patch)?
        .ok_or_else(|| GematriaError::EntryNotFound { id }.into())
}

fn entry_upsert_impl(store: &dyn EntryStore, phrase: &str, value: i64) -> Result<Entry> {
    let phrase = required_phrase(phrase)?;
    store.upsert_many(&[NewEntry {
        phrase: phrase.clone(),
        value,
    }])?;

    // A concurrent delete can win between the upsert and the read
    store
        .get_by_phrase(&phrase)?
        .ok_or_else(|| GematriaError::PhraseNotFound { phrase }.into())
}
