//! JSON batch files: an array of `{phrase, value}` objects
//!
//! Extra keys such as `source` are accepted and ignored.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, seed_validation, Result};
use gematria_core::model::NewEntry;
use std::fs;
use std::path::Path;

/// Parse a batch from JSON text
pub fn parse_batch_str(content: &str) -> Result<Vec<NewEntry>> {
    serde_json::from_str(content)
        .map_err(|e| seed_validation(&format!("Batch must be an array of {{phrase, value}}: {}", e)))
}

/// Read and parse a batch file
pub fn parse_batch_file(path: &Path) -> Result<Vec<NewEntry>> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_batch_file", e))?;
    parse_batch_str(&content)
}
