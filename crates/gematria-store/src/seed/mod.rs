//! Bulk data sources
//!
//! Provides:
//! - Strong's Hebrew dictionary reader (JS-wrapped JSON)
//! - Hebrew word extraction from running text files
//! - JSON batch file reader for `{phrase, value}` arrays
//! - Row building with computed values for any of these

pub mod batch;
pub mod importer;
pub mod strongs;
pub mod text;

pub use batch::{parse_batch_file, parse_batch_str};
pub use importer::{lemma_rows, word_rows, ImportOptions};
pub use strongs::{parse_strongs_file, parse_strongs_str, StrongsLemma};
pub use text::read_text_words;
