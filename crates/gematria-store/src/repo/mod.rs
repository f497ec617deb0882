//! Repository layer for SQLite persistence

pub mod sqlite_repo;

pub use sqlite_repo::SqliteEntryStore;
