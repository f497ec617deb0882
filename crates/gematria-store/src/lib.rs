//! Gematria Store - SQLite persistence and data sources
//!
//! Provides:
//! - Connection management and database URL resolution
//! - Bootstrap of the `gematria_entries` table
//! - `SqliteEntryStore`, the SQLite implementation of `EntryStore`
//! - Classification of SQLite failures into the core error kinds
//! - Readers that turn Strong's dictionary files and running text into rows

pub mod db;
pub mod errors;
pub mod repo;
pub mod schema;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteEntryStore;
