//! The language-to-entries mapping.
//!
//! `Vocabulary` is the unit of persistence. It serializes to
//! `{"English": [...], "French": [...], "German": [...]}` and always carries
//! a sequence for every supported language.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::Entry;
use crate::language::Language;

/// Entries for every supported language, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    #[serde(rename = "English")]
    english: Vec<Entry>,
    #[serde(rename = "French")]
    french: Vec<Entry>,
    #[serde(rename = "German")]
    german: Vec<Entry>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries stored for `language`, in insertion order.
    #[must_use]
    pub fn entries(&self, language: Language) -> &[Entry] {
        match language {
            Language::English => &self.english,
            Language::French => &self.french,
            Language::German => &self.german,
        }
    }

    fn entries_mut(&mut self, language: Language) -> &mut Vec<Entry> {
        match language {
            Language::English => &mut self.english,
            Language::French => &mut self.french,
            Language::German => &mut self.german,
        }
    }

    /// Number of entries stored for `language`.
    #[must_use]
    pub fn len(&self, language: Language) -> usize {
        self.entries(language).len()
    }

    /// Total number of entries across all languages.
    #[must_use]
    pub fn total(&self) -> usize {
        Language::ALL.iter().map(|lang| self.len(*lang)).sum()
    }

    /// Check whether no language has any entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Append a word/meaning pair to `language`.
    ///
    /// Returns `false` and leaves the vocabulary untouched when either side is
    /// empty. No other validation is done; duplicates are kept.
    pub fn add_word(&mut self, language: Language, word: &str, meaning: &str) -> bool {
        if word.is_empty() || meaning.is_empty() {
            debug!("Ignoring add for {language}: word or meaning is empty");
            return false;
        }
        self.entries_mut(language).push(Entry::new(word, meaning));
        true
    }

    /// Builder-style variant of [`Vocabulary::add_word`].
    #[must_use]
    pub fn with_word(mut self, language: Language, word: &str, meaning: &str) -> Self {
        self.add_word(language, word, meaning);
        self
    }
}
