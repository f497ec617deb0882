//! Standard (Mispar Hechrechi) gematria
//!
//! `normalize` canonicalizes arbitrary user text into a phrase made of
//! Hebrew letters and spaces; `compute_value` sums the letter values of
//! that phrase. Both are pure and safe to call from any thread.

pub mod calculator;
pub mod normalize;
pub mod words;

pub use calculator::{breakdown, compute_value, letter_value, FINAL_FORMS};
pub use normalize::{normalize, normalize_opt};
