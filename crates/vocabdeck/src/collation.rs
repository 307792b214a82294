//! Locale-aware string comparison.
//!
//! Dictionary ordering uses the CLDR root collation from ICU4X rather than
//! raw code points, so `"apple" < "Banana" < "cherry"`, accented letters sort
//! next to their base letter, and `ß`, `æ` and `œ` sort as `ss`, `ae` and
//! `oe`. Punctuation sorts before digits, digits before letters.
//!
//! Strings the collator considers equal are ordered by code point, so only
//! identical strings compare equal.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

thread_local! {
    static ROOT: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("Root collation unavailable ({e}), sorting by code point");
                None
            }
        };
}

/// Compare two strings the way a human-facing sorted list expects.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    ROOT.with(|root| match root {
        Some(collator) => collator.compare(a, b),
        None => Ordering::Equal,
    })
    .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(ToString::to_string).collect();
        v.sort_by(|a, b| compare(a, b));
        v
    }

    #[test]
    fn test_case_does_not_dominate() {
        assert_eq!(
            sorted(&["cherry", "Banana", "apple"]),
            vec!["apple", "Banana", "cherry"]
        );
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(sorted(&["f", "é", "e"]), vec!["e", "é", "f"]);
        assert_eq!(
            sorted(&["zebra", "école", "eagle"]),
            vec!["eagle", "école", "zebra"]
        );
    }

    #[test]
    fn test_sharp_s_sorts_as_double_s() {
        assert_eq!(
            sorted(&["Masse", "Mast", "Maß"]),
            vec!["Maß", "Masse", "Mast"]
        );
    }

    #[test]
    fn test_ligatures_expand() {
        assert_eq!(sorted(&["coz", "cod", "cœur"]), vec!["cod", "cœur", "coz"]);
        assert_eq!(compare("Æsop", "Afghan"), Ordering::Less);
        assert_eq!(compare("Æsop", "Mast"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_then_digits_then_letters() {
        assert_eq!(
            sorted(&["a1", "1a", "{x", "_b"]),
            vec!["_b", "{x", "1a", "a1"]
        );
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(compare("a", "A"), Ordering::Less);
        assert_eq!(compare("Hund", "hund"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("chat", "chaton"), Ordering::Less);
    }

    #[test]
    fn test_equal_only_for_identical() {
        assert_eq!(compare("Straße", "Straße"), Ordering::Equal);
        assert_ne!(compare("é", "e\u{301}"), Ordering::Equal);
    }

    #[test]
    fn test_empty_string_first() {
        assert_eq!(compare("", "a"), Ordering::Less);
        assert_eq!(compare("", ""), Ordering::Equal);
    }
}
