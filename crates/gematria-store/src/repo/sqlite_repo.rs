//! SQLite repository implementation
//!
//! Persists entries to the `gematria_entries` table. One connection per
//! store, guarded by a mutex; several stores (one per process or thread)
//! may share a database file and are ordered by SQLite's write lock.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::db::{self, DatabaseTarget};
use crate::errors::{from_rusqlite, from_rusqlite_for_phrase, Result};
use crate::schema;
use gematria_core::errors::{ExError, ExErrorKind};
use gematria_core::model::{Entry, EntryPatch, NewEntry};
use gematria_core::ops::{EntryStore, StoreHealth};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const SELECT_COLUMNS: &str = "SELECT id, phrase, value FROM gematria_entries";

const UPSERT_SQL: &str = "INSERT INTO gematria_entries (phrase, value) VALUES (?1, ?2)
     ON CONFLICT(phrase) DO UPDATE SET value = excluded.value";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        phrase: row.get(1)?,
        value: row.get(2)?,
    })
}

fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Entry>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", SELECT_COLUMNS),
        [id],
        entry_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

fn select_by_phrase(conn: &Connection, phrase: &str) -> Result<Option<Entry>> {
    conn.query_row(
        &format!("{} WHERE phrase = ?1", SELECT_COLUMNS),
        [phrase],
        entry_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

/// SQLite-backed `EntryStore`
pub struct SqliteEntryStore {
    conn: Mutex<Connection>,
}

impl SqliteEntryStore {
    /// Wrap an already configured connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_connection(db::open(path)?))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(db::open_in_memory()?))
    }

    /// Open whatever a database URL points at
    pub fn open_url(url: &str) -> Result<Self> {
        Ok(Self::from_connection(db::open_target(
            &DatabaseTarget::parse(url),
        )?))
    }

    /// Create the entries table if it is missing
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::create_tables(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("sqlite_store_lock")
                .with_message("connection mutex poisoned")
        })
    }
}

impl EntryStore for SqliteEntryStore {
    fn get_by_id(&self, id: i64) -> Result<Option<Entry>> {
        let conn = self.lock()?;
        select_by_id(&conn, id)
    }

    fn get_by_phrase(&self, phrase: &str) -> Result<Option<Entry>> {
        let conn = self.lock()?;
        select_by_phrase(&conn, phrase)
    }

    fn list_by_value(&self, value: i64, limit: u32) -> Result<Vec<Entry>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "{} WHERE value = ?1 ORDER BY phrase ASC LIMIT ?2",
                SELECT_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map(params![value, limit], entry_from_row)
            .map_err(from_rusqlite)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)
    }

    fn insert(&self, row: &NewEntry) -> Result<Entry> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO gematria_entries (phrase, value) VALUES (?1, ?2)",
            params![row.phrase, row.value],
        )
        .map_err(|e| from_rusqlite_for_phrase(e, &row.phrase))?;

        Ok(Entry {
            id: conn.last_insert_rowid(),
            phrase: row.phrase.clone(),
            value: row.value,
        })
    }

    fn update(&self, id: i64, patch: &EntryPatch) -> Result<Option<Entry>> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        let Some(mut entry) = select_by_id(&tx, id)? else {
            return Ok(None);
        };
        patch.apply_to(&mut entry);

        tx.execute(
            "UPDATE gematria_entries SET phrase = ?1, value = ?2 WHERE id = ?3",
            params![entry.phrase, entry.value, id],
        )
        .map_err(|e| from_rusqlite_for_phrase(e, &entry.phrase))?;

        tx.commit().map_err(from_rusqlite)?;
        Ok(Some(entry))
    }

    fn delete_by_id(&self, id: i64) -> Result<Option<Entry>> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        let Some(entry) = select_by_id(&tx, id)? else {
            return Ok(None);
        };
        tx.execute("DELETE FROM gematria_entries WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;

        tx.commit().map_err(from_rusqlite)?;
        Ok(Some(entry))
    }

    fn delete_by_phrase(&self, phrase: &str) -> Result<Option<Entry>> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        let Some(entry) = select_by_phrase(&tx, phrase)? else {
            return Ok(None);
        };
        tx.execute("DELETE FROM gematria_entries WHERE id = ?1", [entry.id])
            .map_err(from_rusqlite)?;

        tx.commit().map_err(from_rusqlite)?;
        Ok(Some(entry))
    }

    fn upsert_many(&self, rows: &[NewEntry]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        let mut affected = 0u64;
        {
            let mut stmt = tx.prepare_cached(UPSERT_SQL).map_err(from_rusqlite)?;
            for row in rows {
                affected += stmt
                    .execute(params![row.phrase, row.value])
                    .map_err(from_rusqlite)? as u64;
            }
        }

        tx.commit().map_err(from_rusqlite)?;
        Ok(affected)
    }

    fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM gematria_entries", [], |r| r.get(0))
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }

    fn health(&self) -> Result<StoreHealth> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))
            .map_err(from_rusqlite)?;

        Ok(StoreHealth {
            reachable: true,
            table_exists: schema::table_exists(&conn)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteEntryStore {
        let store = SqliteEntryStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_insert_then_lookup() {
        let store = store();
        let created = store.insert(&NewEntry::new("שלום", 376)).unwrap();

        assert_eq!(store.get_by_id(created.id).unwrap(), Some(created.clone()));
        assert_eq!(store.get_by_phrase("שלום").unwrap(), Some(created));
        assert_eq!(store.get_by_phrase("עולם").unwrap(), None);
    }

    #[test]
    fn test_duplicate_insert_is_conflict() {
        let store = store();
        store.insert(&NewEntry::new("אב", 3)).unwrap();
        let err = store.insert(&NewEntry::new("אב", 4)).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Conflict);
        assert_eq!(err.phrase(), Some("אב"));
    }

    #[test]
    fn test_update_into_taken_phrase_is_conflict() {
        let store = store();
        store.insert(&NewEntry::new("אב", 3)).unwrap();
        let other = store.insert(&NewEntry::new("גד", 7)).unwrap();

        let patch = EntryPatch {
            phrase: Some("אב".to_string()),
            value: None,
        };
        let err = store.update(other.id, &patch).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Conflict);

        // Unchanged after the failed update
        assert_eq!(store.get_by_id(other.id).unwrap().unwrap().phrase, "גד");
    }

    #[test]
    fn test_update_missing_id_is_none() {
        let store = store();
        let patch = EntryPatch {
            phrase: None,
            value: Some(1),
        };
        assert_eq!(store.update(99, &patch).unwrap(), None);
    }

    #[test]
    fn test_upsert_many_inserts_and_overwrites() {
        let store = store();
        store.insert(&NewEntry::new("אב", 100)).unwrap();

        let affected = store
            .upsert_many(&[NewEntry::new("אב", 3), NewEntry::new("גד", 7)])
            .unwrap();

        assert_eq!(affected, 2);
        assert_eq!(store.get_by_phrase("אב").unwrap().unwrap().value, 3);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_upsert_keeps_id_of_existing_row() {
        let store = store();
        let original = store.insert(&NewEntry::new("אב", 100)).unwrap();
        store.upsert_many(&[NewEntry::new("אב", 3)]).unwrap();

        assert_eq!(store.get_by_phrase("אב").unwrap().unwrap().id, original.id);
    }

    #[test]
    fn test_list_by_value_orders_by_phrase_and_limits() {
        let store = store();
        store
            .upsert_many(&[
                NewEntry::new("הו", 11),
                NewEntry::new("אי", 11),
                NewEntry::new("יא", 11),
                NewEntry::new("ב", 2),
            ])
            .unwrap();

        let phrases: Vec<String> = store
            .list_by_value(11, 2)
            .unwrap()
            .into_iter()
            .map(|e| e.phrase)
            .collect();
        assert_eq!(phrases, vec!["אי".to_string(), "הו".to_string()]);
    }

    #[test]
    fn test_deletes_return_removed_row() {
        let store = store();
        let a = store.insert(&NewEntry::new("אב", 3)).unwrap();
        store.insert(&NewEntry::new("גד", 7)).unwrap();

        assert_eq!(store.delete_by_id(a.id).unwrap(), Some(a.clone()));
        assert_eq!(store.delete_by_id(a.id).unwrap(), None);
        assert_eq!(
            store.delete_by_phrase("גד").unwrap().map(|e| e.value),
            Some(7)
        );
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_health_reports_missing_table() {
        let store = SqliteEntryStore::open_in_memory().unwrap();
        assert_eq!(
            store.health().unwrap(),
            StoreHealth {
                reachable: true,
                table_exists: false
            }
        );

        let err = store.count().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::SchemaMissing);
    }
}
