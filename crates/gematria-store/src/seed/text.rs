//! Hebrew words from plain text files

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use gematria_core::gematria::words::unique_words;
use std::fs;
use std::path::Path;

/// Unique normalized single-token words of a UTF-8 text file, in order of
/// first appearance. `max_words == 0` means no limit.
pub fn read_text_words(path: &Path, max_words: usize) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_text_file", e))?;
    Ok(unique_words(&content, max_words))
}
