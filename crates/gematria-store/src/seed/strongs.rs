//! Strong's Hebrew dictionary reader
//!
//! The published dictionary is a script of the form
//! `var strongsHebrewDictionary = {"H1": {"lemma": "...", ...}, ...};`.
//! Everything between the first `{` and the last `}` is the JSON payload.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, seed_validation, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One dictionary entry, reduced to what the importer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrongsLemma {
    /// Strong's number, e.g. `H1`
    pub strong_id: String,
    /// Lemma as written in the dictionary, marks included
    pub lemma: String,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    lemma: Option<String>,
}

/// Slice out the JSON object embedded in the JS wrapper
pub fn extract_json_object(js_text: &str) -> Result<&str> {
    match (js_text.find('{'), js_text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(&js_text[start..=end]),
        _ => Err(seed_validation("Could not locate JSON object in JS file")),
    }
}

/// Parse dictionary text, keeping file order
pub fn parse_strongs_str(js_text: &str) -> Result<Vec<StrongsLemma>> {
    let json = extract_json_object(js_text)?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| seed_validation(&format!("JSON parse error: {}", e)))?;

    map.into_iter()
        .map(|(strong_id, value)| {
            let raw: RawEntry = serde_json::from_value(value).map_err(|e| {
                seed_validation(&format!("Malformed entry {}: {}", strong_id, e))
            })?;
            Ok(StrongsLemma {
                strong_id,
                lemma: raw.lemma.unwrap_or_default().trim().to_string(),
            })
        })
        .collect()
}

/// Read and parse a dictionary file
pub fn parse_strongs_file(path: &Path) -> Result<Vec<StrongsLemma>> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_strongs_file", e))?;
    parse_strongs_str(&content)
}
