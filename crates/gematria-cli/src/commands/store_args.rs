//! Database options shared by the writing commands

use clap::Args;
use gematria_core::errors::{ExError, ExErrorKind};
use gematria_core::model::NewEntry;
use gematria_core::reconcile::{ReconcileReport, Reconciler, DEFAULT_CHUNK_SIZE};
use gematria_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use gematria_store::SqliteEntryStore;

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// SQLite database path or sqlite:// URL
    #[arg(long = "db", env = "DATABASE_URL", default_value = "gematria.db")]
    pub db: String,

    /// Rows per transaction
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

impl StoreArgs {
    /// Open the database, creating the entries table if needed, and
    /// reconcile `rows` into it
    pub fn reconcile(&self, rows: Vec<NewEntry>) -> Result<ReconcileReport, ExError> {
        let reconciler = Reconciler::with_chunk_size(self.chunk_size)?;
        let store = SqliteEntryStore::open_url(&self.db)?;
        store.ensure_schema()?;

        match apply_engine_command(EngineCommand::BulkUpsert { rows }, &store, &reconciler)? {
            EngineCommandResult::BulkUpserted(report) => Ok(report),
            other => Err(ExError::new(ExErrorKind::Internal)
                .with_message(format!("unexpected engine result: {:?}", other))),
        }
    }
}

/// One-line summary printed after every import
pub fn print_report(report: &ReconcileReport) {
    println!(
        "Done. Requested={}, Unique={}, Upserted={}",
        report.requested, report.unique, report.upserted
    );
}
