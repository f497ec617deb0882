//! Persistence seam for entries
//!
//! Every backend must keep `phrase` unique and must classify its
//! failures into `StoreUnavailable`, `SchemaMissing` or `Conflict` where
//! those apply; callers map the kinds to different responses.

use crate::errors::Result;
use crate::model::{Entry, EntryPatch, NewEntry};

/// Reachability report returned by `EntryStore::health`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    /// The backend answered a trivial query
    pub reachable: bool,
    /// The entries table exists
    pub table_exists: bool,
}

/// Key-value style store of entries keyed by unique phrase
///
/// Lookups return `Ok(None)` for absent rows; not-found is not a fault at
/// this layer.
pub trait EntryStore: Send + Sync {
    /// Fetch an entry by id
    fn get_by_id(&self, id: i64) -> Result<Option<Entry>>;

    /// Fetch an entry by exact phrase
    fn get_by_phrase(&self, phrase: &str) -> Result<Option<Entry>>;

    /// Entries carrying `value`, ordered by phrase ascending, at most `limit`
    fn list_by_value(&self, value: i64, limit: u32) -> Result<Vec<Entry>>;

    /// Insert a new entry; `Conflict` when the phrase is taken
    fn insert(&self, row: &NewEntry) -> Result<Entry>;

    /// Apply a partial update; `Ok(None)` when the id does not exist,
    /// `Conflict` when the new phrase belongs to another entry
    fn update(&self, id: i64, patch: &EntryPatch) -> Result<Option<Entry>>;

    /// Delete by id, returning the removed entry
    fn delete_by_id(&self, id: i64) -> Result<Option<Entry>>;

    /// Delete by phrase, returning the removed entry
    fn delete_by_phrase(&self, phrase: &str) -> Result<Option<Entry>>;

    /// Insert-or-overwrite every row as one atomic unit, keyed on phrase.
    ///
    /// Returns rows affected (inserted + updated). Either all rows are
    /// applied or none are. Rows must already carry distinct phrases.
    fn upsert_many(&self, rows: &[NewEntry]) -> Result<u64>;

    /// Number of stored entries
    fn count(&self) -> Result<u64>;

    /// Connectivity and schema probe
    fn health(&self) -> Result<StoreHealth>;
}
