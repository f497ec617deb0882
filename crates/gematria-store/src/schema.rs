//! Entries table bootstrap
//!
//! There is no migration history; the table is created idempotently when
//! the operator asks for it and otherwise only probed.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

/// Name of the single table this crate owns
pub const ENTRIES_TABLE: &str = "gematria_entries";

const CREATE_ENTRIES_SQL: &str = include_str!("../schema/001_gematria_entries.sql");

/// Create the entries table and its value index if absent
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_ENTRIES_SQL)
        .map_err(from_rusqlite)?;
    tracing::info!(table = ENTRIES_TABLE, "entries table ensured");
    Ok(())
}

/// Whether the entries table exists
pub fn table_exists(conn: &Connection) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [ENTRIES_TABLE],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!table_exists(&conn).unwrap());

        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        assert!(table_exists(&conn).unwrap());
    }

    #[test]
    fn test_value_index_created() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'ix_gematria_entries_value'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
