//! Word extraction helpers used by the importers
//!
//! Import sources hand us running text (verses, dictionary lemmas). These
//! helpers split it into Hebrew word candidates and shape each candidate
//! into the phrase that gets stored.

use std::collections::HashSet;

use super::normalize::normalize;

fn is_hebrew_block(ch: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&ch)
}

/// Maximal runs of Hebrew-block characters, in order of appearance.
///
/// Marks stay attached to their run, so the runs still need `normalize`.
pub fn hebrew_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !is_hebrew_block(ch))
        .filter(|run| !run.is_empty())
}

/// Normalize a candidate and strip every interior space, producing a
/// single-token phrase. Empty when nothing Hebrew survives.
pub fn single_word(raw: &str) -> String {
    normalize(raw).chars().filter(|c| *c != ' ').collect()
}

/// Collapse runs of whitespace into one space and trim the ends.
pub fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized multi-word phrase with single spaces, as stored for
/// dictionary lemmas.
pub fn lemma_phrase(raw: &str) -> String {
    collapse_spaces(&normalize(raw))
}

/// Unique single-token words of `text`, first occurrence order.
///
/// `max_words == 0` means no limit.
pub fn unique_words(text: &str, max_words: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for run in hebrew_runs(text) {
        let word = single_word(run);
        if word.is_empty() || !seen.insert(word.clone()) {
            continue;
        }
        words.push(word);
        if max_words > 0 && words.len() >= max_words {
            break;
        }
    }

    words
}
