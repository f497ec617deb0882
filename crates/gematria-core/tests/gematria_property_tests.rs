//! Property tests for the normalizer and calculator

use gematria_core::gematria::{compute_value, letter_value, normalize, FINAL_FORMS};
use proptest::prelude::*;

/// Hebrew letters, niqqud/cantillation marks, whitespace, punctuation and Latin
fn mixed_text() -> impl Strategy<Value = String> {
    let pieces = prop_oneof![
        proptest::char::range('\u{05D0}', '\u{05EA}'),
        proptest::char::range('\u{0591}', '\u{05C7}'),
        Just(' '),
        Just('\t'),
        Just('\n'),
        Just(','),
        Just('!'),
        proptest::char::range('a', 'z'),
        proptest::char::range('0', '9'),
        proptest::char::range('\u{FB1D}', '\u{FB4F}'),
    ];
    proptest::collection::vec(pieces, 0..40).prop_map(|chars| chars.into_iter().collect())
}

fn hebrew_letters() -> impl Strategy<Value = Vec<char>> {
    proptest::collection::vec(proptest::char::range('\u{05D0}', '\u{05EA}'), 2..12)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in mixed_text()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_arbitrary_strings(s in any::<String>()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_output_is_letters_and_inner_spaces(s in mixed_text()) {
        let out = normalize(&s);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(out.chars().all(|c| c == ' ' || letter_value(c).is_some()));
    }

    #[test]
    fn compute_value_never_panics(s in any::<String>()) {
        let _ = compute_value(&s);
    }

    #[test]
    fn marks_between_letters_do_not_change_value(
        letters in hebrew_letters(),
        mark in proptest::char::range('\u{0591}', '\u{05BD}'),
        at in 1usize..11,
    ) {
        let plain: String = letters.iter().collect();
        let split = at.min(letters.len() - 1);
        let mut marked: String = letters[..split].iter().collect();
        marked.push(mark);
        marked.extend(&letters[split..]);

        prop_assert_eq!(compute_value(&marked), compute_value(&plain));
    }

    #[test]
    fn value_is_sum_of_letter_values(letters in hebrew_letters()) {
        let phrase: String = letters.iter().collect();
        let expected: u64 = letters
            .iter()
            .filter_map(|c| letter_value(*c))
            .map(u64::from)
            .sum();
        prop_assert_eq!(compute_value(&phrase), expected);
    }
}

#[test]
fn empty_input_is_zero() {
    assert_eq!(compute_value(""), 0);
}

#[test]
fn shalom_is_376() {
    assert_eq!(compute_value("שלום"), 376);
    assert_eq!(compute_value("  שָׁלוֹם  "), 376);
}

#[test]
fn final_forms_equal_standard_forms() {
    for (final_form, standard) in FINAL_FORMS {
        assert_eq!(
            compute_value(&final_form.to_string()),
            compute_value(&standard.to_string())
        );
    }
}
