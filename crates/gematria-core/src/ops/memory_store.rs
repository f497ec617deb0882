//! In-memory entry store
//!
//! A map-backed `EntryStore` used by tests and by tools that do not need
//! durability. A single mutex guards the maps, which makes each trait
//! call (including a whole `upsert_many`) atomic.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::errors::{ExError, ExErrorKind, GematriaError, Result};
use crate::model::{Entry, EntryPatch, NewEntry};
use crate::ops::store::{EntryStore, StoreHealth};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    /// id -> entry
    entries: HashMap<i64, Entry>,
    /// phrase -> id; the BTreeMap gives phrase ordering for free
    by_phrase: BTreeMap<String, i64>,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove(&mut self, id: i64) -> Option<Entry> {
        let entry = self.entries.remove(&id)?;
        self.by_phrase.remove(&entry.phrase);
        Some(entry)
    }
}

/// Map-backed store; cheap to create, nothing persisted
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    state: Mutex<State>,
}

impl MemoryEntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("memory_store_lock")
                .with_message("store mutex poisoned")
        })
    }
}

impl EntryStore for MemoryEntryStore {
    fn get_by_id(&self, id: i64) -> Result<Option<Entry>> {
        Ok(self.lock()?.entries.get(&id).cloned())
    }

    fn get_by_phrase(&self, phrase: &str) -> Result<Option<Entry>> {
        let state = self.lock()?;
        Ok(state
            .by_phrase
            .get(phrase)
            .and_then(|id| state.entries.get(id))
            .cloned())
    }

    fn list_by_value(&self, value: i64, limit: u32) -> Result<Vec<Entry>> {
        let state = self.lock()?;
        Ok(state
            .by_phrase
            .values()
            .filter_map(|id| state.entries.get(id))
            .filter(|e| e.value == value)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn insert(&self, row: &NewEntry) -> Result<Entry> {
        let mut state = self.lock()?;
        if state.by_phrase.contains_key(&row.phrase) {
            return Err(GematriaError::PhraseExists {
                phrase: row.phrase.clone(),
            }
            .into());
        }

        let entry = Entry {
            id: state.allocate_id(),
            phrase: row.phrase.clone(),
            value: row.value,
        };
        state.by_phrase.insert(entry.phrase.clone(), entry.id);
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn update(&self, id: i64, patch: &EntryPatch) -> Result<Option<Entry>> {
        let mut state = self.lock()?;
        let Some(current) = state.entries.get(&id).cloned() else {
            return Ok(None);
        };

        let mut updated = current.clone();
        patch.apply_to(&mut updated);

        if updated.phrase != current.phrase {
            if state.by_phrase.contains_key(&updated.phrase) {
                return Err(GematriaError::PhraseExists {
                    phrase: updated.phrase,
                }
                .into());
            }
            state.by_phrase.remove(&current.phrase);
            state.by_phrase.insert(updated.phrase.clone(), id);
        }

        state.entries.insert(id, updated.clone());
        Ok(Some(updated))
    }

    fn delete_by_id(&self, id: i64) -> Result<Option<Entry>> {
        Ok(self.lock()?.remove(id))
    }

    fn delete_by_phrase(&self, phrase: &str) -> Result<Option<Entry>> {
        let mut state = self.lock()?;
        let Some(id) = state.by_phrase.get(phrase).copied() else {
            return Ok(None);
        };
        Ok(state.remove(id))
    }

    fn upsert_many(&self, rows: &[NewEntry]) -> Result<u64> {
        let mut state = self.lock()?;
        for row in rows {
            match state.by_phrase.get(&row.phrase).copied() {
                Some(id) => {
                    if let Some(entry) = state.entries.get_mut(&id) {
                        entry.value = row.value;
                    }
                }
                None => {
                    let id = state.allocate_id();
                    state.by_phrase.insert(row.phrase.clone(), id);
                    state.entries.insert(
                        id,
                        Entry {
                            id,
                            phrase: row.phrase.clone(),
                            value: row.value,
                        },
                    );
                }
            }
        }
        Ok(rows.len() as u64)
    }

    fn count(&self) -> Result<u64> {
        Ok(self.lock()?.entries.len() as u64)
    }

    fn health(&self) -> Result<StoreHealth> {
        drop(self.lock()?);
        Ok(StoreHealth {
            reachable: true,
            table_exists: true,
        })
    }
}
