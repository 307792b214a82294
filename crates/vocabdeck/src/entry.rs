//! Vocabulary entries.

use serde::{Deserialize, Serialize};

/// One word/meaning pair stored under a language.
///
/// Entries carry no identity: two entries with the same word and meaning are
/// both kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// The word being learned.
    pub word: String,
    /// What the word means.
    pub meaning: String,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }

    /// Check whether either side contains `term` as a literal substring.
    ///
    /// Matching is case-sensitive; the empty term matches every entry.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.word.contains(term) || self.meaning.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_word_or_meaning() {
        let entry = Entry::new("cat", "chat");
        assert!(entry.contains("ca"));
        assert!(entry.contains("hat"));
        assert!(!entry.contains("dog"));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let entry = Entry::new("Cat", "chat");
        assert!(!entry.contains("cat"));
        assert!(entry.contains("Cat"));
    }

    #[test]
    fn test_empty_term_matches() {
        assert!(Entry::new("a", "b").contains(""));
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{"word":"Hund","meaning":"dog","note":"noun"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, Entry::new("Hund", "dog"));
    }
}
