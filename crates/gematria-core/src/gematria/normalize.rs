//! Phrase normalization
//!
//! Steps: trim, NFKC, drop Unicode marks (niqqud and cantillation are
//! category Mn/Mc), map whitespace to a single space, keep only Hebrew
//! block characters that carry a letter value, trim the result.
//! Runs of interior spaces are preserved.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::calculator::letter_value;

const HEBREW_BLOCK: std::ops::RangeInclusive<char> = '\u{0590}'..='\u{05FF}';

fn is_hebrew_block(ch: char) -> bool {
    HEBREW_BLOCK.contains(&ch)
}

/// Unicode whitespace plus the ASCII information separators U+001C..U+001F
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&ch)
}

/// Canonicalize text into a phrase of Hebrew letters and spaces.
///
/// Total: empty, punctuation-only or foreign-script input yields an empty
/// or partial string, never an error.
///
/// ```
/// use gematria_core::gematria::normalize;
///
/// assert_eq!(normalize("  בְּרֵאשִׁית, "), "בראשית");
/// assert_eq!(normalize("abc"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for ch in raw
        .trim_matches(is_space)
        .nfkc()
        .filter(|c| !is_combining_mark(*c))
    {
        if is_space(ch) {
            out.push(' ');
        } else if is_hebrew_block(ch) && letter_value(ch).is_some() {
            out.push(ch);
        }
    }

    // A dropped character at either edge can leave a dangling space.
    out.trim_matches(' ').to_string()
}

/// `normalize` for optional input; `None` is treated as empty.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_niqqud() {
        assert_eq!(normalize("שָׁלוֹם"), "שלום");
    }

    #[test]
    fn test_strips_cantillation() {
        // Etnahta (U+0591) and tipeha (U+0596)
        assert_eq!(normalize("אֱלֹהִ֑ים"), "אלהים");
        assert_eq!(normalize("ב\u{0596}ר"), "בר");
    }

    #[test]
    fn test_whitespace_becomes_single_space_without_collapsing() {
        assert_eq!(normalize("אב\tגד"), "אב גד");
        assert_eq!(normalize("אב  גד"), "אב  גד");
        assert_eq!(normalize("אב\n\nגד"), "אב  גד");
    }

    #[test]
    fn test_information_separators_are_whitespace() {
        assert_eq!(normalize("א\u{1F}ב"), "א ב");
        assert_eq!(normalize("א\u{1C}\u{1D}ב"), "א  ב");
        assert_eq!(normalize("\u{1E}אב\u{1F}"), "אב");
    }

    #[test]
    fn test_drops_punctuation_digits_and_latin() {
        assert_eq!(normalize("שלום, world! 42"), "שלום");
        assert_eq!(normalize("...!?"), "");
    }

    #[test]
    fn test_drops_hebrew_punctuation() {
        // Maqaf (U+05BE) and sof pasuq (U+05C3) are in the block but carry no value
        assert_eq!(normalize("בית\u{05BE}אל\u{05C3}"), "ביתאל");
        // Geresh (U+05F3)
        assert_eq!(normalize("ג\u{05F3}"), "ג");
    }

    #[test]
    fn test_edge_spaces_left_by_dropped_chars_are_trimmed() {
        assert_eq!(normalize("! אב"), "אב");
        assert_eq!(normalize("אב ?"), "אב");
    }

    #[test]
    fn test_presentation_forms_fold_to_letters() {
        // Alef with patah (U+FB2E) decomposes to alef + mark
        assert_eq!(normalize("\u{FB2E}"), "א");
        // Wide ayin (U+FB20) is a compatibility variant
        assert_eq!(normalize("\u{FB20}"), "ע");
        // Alef-lamed ligature (U+FB4F)
        assert_eq!(normalize("\u{FB4F}"), "אל");
    }

    #[test]
    fn test_final_forms_are_kept() {
        assert_eq!(normalize("מלך"), "מלך");
    }

    #[test]
    fn test_normalize_opt_none_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some(" א ")), "א");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for s in ["", " ", "שָׁלוֹם עֲלֵיכֶם", "! א ?", "a b c", "\u{FB4F}ה"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }
}
