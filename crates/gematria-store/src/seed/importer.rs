//! Row building for imports
//!
//! Turns dictionary lemmas or extracted words into `NewEntry` rows with
//! computed values. Phrases seen earlier in the same source are skipped,
//! so the rows handed to the reconciler are already unique.

use crate::seed::strongs::StrongsLemma;
use gematria_core::gematria::compute_value;
use gematria_core::gematria::words::lemma_phrase;
use gematria_core::model::NewEntry;
use std::collections::HashSet;

/// Limits applied while building rows from a source
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Consider only the first N source items (0 = all)
    pub max_items: usize,
    /// Log progress every N processed items (0 = never)
    pub progress_every: usize,
}

fn stored_value(phrase: &str) -> i64 {
    i64::try_from(compute_value(phrase)).unwrap_or(i64::MAX)
}

/// Rows for dictionary lemmas: normalized, whitespace collapsed, first
/// occurrence kept
pub fn lemma_rows(lemmas: &[StrongsLemma], options: &ImportOptions) -> Vec<NewEntry> {
    let items = match options.max_items {
        0 => lemmas,
        max => &lemmas[..max.min(lemmas.len())],
    };

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let phrase = lemma_phrase(&item.lemma);
        if !phrase.is_empty() && seen.insert(phrase.clone()) {
            rows.push(NewEntry {
                value: stored_value(&phrase),
                phrase,
            });
        } else {
            tracing::trace!(strong_id = %item.strong_id, "lemma skipped");
        }

        let processed = i + 1;
        if options.progress_every > 0 && processed % options.progress_every == 0 {
            tracing::info!(
                processed,
                total = items.len(),
                unique = seen.len(),
                "strongs progress"
            );
        }
    }

    rows
}

/// Rows for already unique, normalized words
pub fn word_rows(words: &[String]) -> Vec<NewEntry> {
    words
        .iter()
        .map(|word| NewEntry {
            phrase: word.clone(),
            value: stored_value(word),
        })
        .collect()
}
