//! Bulk command
//!
//! Usage: gematria bulk <JSON_PATH> [--db PATH]

use clap::Args;
use gematria_store::seed::parse_batch_file;
use std::path::PathBuf;

use super::store_args::{print_report, StoreArgs};

#[derive(Debug, Args)]
pub struct BulkArgs {
    /// JSON file holding an array of {phrase, value} objects
    pub path: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute bulk command
pub fn execute(args: BulkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows = parse_batch_file(&args.path)?;
    let report = args.store.reconcile(rows)?;
    print_report(&report);
    Ok(())
}
