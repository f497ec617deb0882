//! Command orchestration layer.
//!
//! The engine layer owns lifecycle logging for every operation:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod engine_command;
pub mod engine_query;

use gematria_core::errors::{GematriaError, Result};

/// Trim a phrase and reject it when nothing is left
pub(crate) fn required_phrase(phrase: &str) -> Result<String> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return Err(GematriaError::EmptyPhrase.into());
    }
    Ok(trimmed.to_string())
}
