//! Shared handler state

#![allow(clippy::result_large_err)]

use std::sync::Arc;

use gematria_core::errors::Result;
use gematria_core::ops::EntryStore;
use gematria_core::reconcile::Reconciler;
use gematria_store::db::DatabaseTarget;
use gematria_store::SqliteEntryStore;

use crate::config::ApiConfig;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub reconciler: Reconciler,
    /// Whether `/debug/db` answers
    pub debug: bool,
    /// Database location shown by `/debug/db`
    pub database_label: String,
}

impl AppState {
    /// State over any store, debug endpoint off
    pub fn new(store: Arc<dyn EntryStore>, reconciler: Reconciler) -> Self {
        Self {
            store,
            reconciler,
            debug: false,
            database_label: String::new(),
        }
    }

    /// Enable `/debug/db`, reporting `database_label` as the location
    pub fn with_debug(mut self, database_label: impl Into<String>) -> Self {
        self.debug = true;
        self.database_label = database_label.into();
        self
    }

    /// Open the configured SQLite database and build state from it
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let target = DatabaseTarget::parse(config.database_url.expose());
        let label = match &target {
            DatabaseTarget::File(path) => path.display().to_string(),
            DatabaseTarget::InMemory => ":memory:".to_string(),
        };

        let store = SqliteEntryStore::open_url(config.database_url.expose())?;
        if config.auto_create_tables {
            store.ensure_schema()?;
        }

        let state = Self::new(
            Arc::new(store),
            Reconciler::with_chunk_size(config.bulk_chunk_size)?,
        );
        Ok(if config.debug {
            state.with_debug(label)
        } else {
            state
        })
    }
}
