//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for read-only queries.
//! Unlike `apply_engine_command` it never writes to the store, and
//! `Compute` does not touch the store at all.

#![allow(clippy::result_large_err)]

use gematria_core::errors::{GematriaError, Result};
use gematria_core::gematria::{compute_value, normalize};
use gematria_core::model::Entry;
use gematria_core::ops::EntryStore;
use gematria_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;

/// `top` used by `Matches` when the caller gives none
pub const DEFAULT_MATCHES_TOP: i64 = 10;

/// Largest accepted `top` for `Matches`
pub const MAX_MATCHES_TOP: u32 = 1000;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Stored value for an exact (trimmed) phrase.
    Lookup { phrase: String },
    /// Stored entry for an exact (trimmed) phrase.
    EntryGetByPhrase { phrase: String },
    /// Entries with a given value, ordered by phrase.
    Matches { value: i64, top: Option<i64> },
    /// Normalize and value a phrase without consulting the store.
    Compute { phrase: String },
    /// Connectivity and schema probe.
    Health,
    /// Row count for diagnostics.
    DebugInfo,
}

/// Stored lookup answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub phrase: String,
    pub value: i64,
    pub found: bool,
}

/// Computed value of a phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputeResult {
    pub phrase: String,
    pub normalized: String,
    pub value: u64,
}

/// Health answer; `ok` is false when the store cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthResult {
    pub ok: bool,
    pub db_ok: bool,
    pub table_exists: bool,
}

/// Diagnostics answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DebugInfoResult {
    pub entries_count: u64,
}

/// Result of applying an engine query.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineQueryResult {
    Lookup(LookupResult),
    Entry(Entry),
    Matches(Vec<Entry>),
    Compute(ComputeResult),
    Health(HealthResult),
    DebugInfo(DebugInfoResult),
}

/// Apply a read-only query.
pub fn apply_engine_query(query: EngineQuery, store: &dyn EntryStore) -> Result<EngineQueryResult> {
    let op = query_op_name(&query);
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = match query {
        EngineQuery::Lookup { phrase } => find_by_phrase(store, &phrase).map(|entry| {
            EngineQueryResult::Lookup(LookupResult {
                phrase: entry.phrase,
                value: entry.value,
                found: true,
            })
        }),

        EngineQuery::EntryGetByPhrase { phrase } => {
            find_by_phrase(store, &phrase).map(EngineQueryResult::Entry)
        }

        EngineQuery::Matches { value, top } => validate_top(top)
            .and_then(|limit| store.list_by_value(value, limit))
            .map(EngineQueryResult::Matches),

        EngineQuery::Compute { phrase } => {
            let normalized = normalize(&phrase);
            let value = compute_value(&normalized);
            Ok(EngineQueryResult::Compute(ComputeResult {
                phrase,
                normalized,
                value,
            }))
        }

        EngineQuery::Health => health_impl(store).map(EngineQueryResult::Health),

        EngineQuery::DebugInfo => store
            .count()
            .map(|entries_count| EngineQueryResult::DebugInfo(DebugInfoResult { entries_count })),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = elapsed),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!(op, e_clone, duration_ms = elapsed);
        }
    }
    result
}

fn query_op_name(query: &EngineQuery) -> &'static str {
    match query {
        EngineQuery::Lookup { .. } => "gematria_lookup",
        EngineQuery::EntryGetByPhrase { .. } => "entry_get_by_phrase",
        EngineQuery::Matches { .. } => "matches",
        EngineQuery::Compute { .. } => "gematria_compute",
        EngineQuery::Health => "health",
        EngineQuery::DebugInfo => "debug_info",
    }
}

fn find_by_phrase(store: &dyn EntryStore, phrase: &str) -> Result<Entry> {
    let phrase = phrase.trim();
    store.get_by_phrase(phrase)?.ok_or_else(|| {
        GematriaError::PhraseNotFound {
            phrase: phrase.to_string(),
        }
        .into()
    })
}

fn validate_top(top: Option<i64>) -> Result<u32> {
    let top = top.unwrap_or(DEFAULT_MATCHES_TOP);
    match u32::try_from(top) {
        Ok(limit) if (1..=MAX_MATCHES_TOP).contains(&limit) => Ok(limit),
        _ => Err(GematriaError::InvalidLimit {
            limit: top,
            max: MAX_MATCHES_TOP,
        }
        .into()),
    }
}

fn health_impl(store: &dyn EntryStore) -> Result<HealthResult> {
    match store.health() {
        Ok(health) => Ok(HealthResult {
            ok: health.reachable,
            db_ok: health.reachable,
            table_exists: health.table_exists,
        }),
        Err(e) if e.kind().is_unavailable() => {
            tracing::debug!(err_code = e.code(), "store unreachable during health probe");
            Ok(HealthResult {
                ok: false,
                db_ok: false,
                table_exists: false,
            })
        }
        Err(e) => Err(e),
    }
}
