//! Letter values and phrase summation

use super::normalize::normalize;

/// Word-final letter forms paired with their standard counterpart.
pub const FINAL_FORMS: [(char, char); 5] = [
    ('ך', 'כ'),
    ('ם', 'מ'),
    ('ן', 'נ'),
    ('ף', 'פ'),
    ('ץ', 'צ'),
];

/// Standard gematria value of a single Hebrew letter.
///
/// Covers the 22 letters and the 5 final forms; final forms carry the
/// value of their standard letter. Anything else is `None`.
pub const fn letter_value(ch: char) -> Option<u32> {
    let value = match ch {
        'א' => 1,
        'ב' => 2,
        'ג' => 3,
        'ד' => 4,
        'ה' => 5,
        'ו' => 6,
        'ז' => 7,
        'ח' => 8,
        'ט' => 9,
        'י' => 10,
        'כ' | 'ך' => 20,
        'ל' => 30,
        'מ' | 'ם' => 40,
        'נ' | 'ן' => 50,
        'ס' => 60,
        'ע' => 70,
        'פ' | 'ף' => 80,
        'צ' | 'ץ' => 90,
        'ק' => 100,
        'ר' => 200,
        'ש' => 300,
        'ת' => 400,
        _ => return None,
    };
    Some(value)
}

/// Gematria value of arbitrary text.
///
/// The text is normalized first; spaces and anything outside the letter
/// table contribute nothing. Never fails.
///
/// ```
/// use gematria_core::gematria::compute_value;
///
/// assert_eq!(compute_value("שלום"), 376);
/// assert_eq!(compute_value(""), 0);
/// ```
pub fn compute_value(raw: &str) -> u64 {
    normalize(raw)
        .chars()
        .filter_map(letter_value)
        .map(u64::from)
        .sum()
}

/// Per-letter values of the normalized phrase, in order.
pub fn breakdown(raw: &str) -> Vec<(char, u32)> {
    normalize(raw)
        .chars()
        .filter_map(|ch| letter_value(ch).map(|v| (ch, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shalom_is_376() {
        assert_eq!(compute_value("שלום"), 376);
    }

    #[test]
    fn test_empty_and_non_hebrew_are_zero() {
        assert_eq!(compute_value(""), 0);
        assert_eq!(compute_value("   \t\n"), 0);
        assert_eq!(compute_value("hello, world 123"), 0);
    }

    #[test]
    fn test_final_forms_match_standard() {
        for (final_form, standard) in FINAL_FORMS {
            assert_eq!(letter_value(final_form), letter_value(standard));
            assert!(letter_value(final_form).is_some());
        }
    }

    #[test]
    fn test_table_covers_27_letters() {
        let count = ('\u{05D0}'..='\u{05EA}')
            .filter(|c| letter_value(*c).is_some())
            .count();
        assert_eq!(count, 27);
    }

    #[test]
    fn test_value_set() {
        let mut values: Vec<u32> = ('\u{05D0}'..='\u{05EA}')
            .filter_map(letter_value)
            .collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(
            values,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 200, 300, 400]
        );
    }

    #[test]
    fn test_spaces_contribute_nothing() {
        assert_eq!(compute_value("אב גד"), compute_value("אבגד"));
        assert_eq!(compute_value("אב גד"), 10);
    }

    #[test]
    fn test_breakdown_lists_normalized_letters() {
        let parts = breakdown("שָׁלוֹם!");
        assert_eq!(parts, vec![('ש', 300), ('ל', 30), ('ו', 6), ('ם', 40)]);
    }
}
