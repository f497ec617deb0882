//! Database connection management
//!
//! Resolves database URLs and opens configured SQLite connections

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits on a locked database before giving up
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a database URL points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    File(PathBuf),
    InMemory,
}

impl DatabaseTarget {
    /// Resolve a database URL or bare path.
    ///
    /// Accepts `sqlite://path`, `sqlite:path`, `:memory:` and plain paths.
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path == ":memory:" {
            DatabaseTarget::InMemory
        } else {
            DatabaseTarget::File(PathBuf::from(path))
        }
    }
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Open whatever a database URL points at
pub fn open_target(target: &DatabaseTarget) -> Result<Connection> {
    match target {
        DatabaseTarget::File(path) => open(path),
        DatabaseTarget::InMemory => open_in_memory(),
    }
}

/// Configure a connection for concurrent writers
pub fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT).map_err(from_rusqlite)?;

    // journal_mode answers with a row, so go through pragma_update
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(from_rusqlite)?;

    Ok(())
}
