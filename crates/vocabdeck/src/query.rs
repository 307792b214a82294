//! Dictionary queries over stored entries.

use serde::Serialize;

use crate::collation;
use crate::entry::Entry;
use crate::language::Language;
use crate::vocabulary::Vocabulary;

/// Keep entries whose word or meaning contains `term`, sorted by word.
///
/// Matching is a literal, case-sensitive substring test. Ordering uses
/// [`collation::compare`] on the word; the sort is stable, so entries with the
/// same word keep their insertion order. The input is never modified.
#[must_use]
pub fn filter_and_sort(entries: &[Entry], term: &str) -> Vec<Entry> {
    let mut matches: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.contains(term))
        .cloned()
        .collect();
    matches.sort_by(|a, b| collation::compare(&a.word, &b.word));
    matches
}

/// Entry counts for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    /// The language.
    pub language: Language,
    /// Number of stored entries.
    pub entries: usize,
    /// Number of distinct words.
    pub distinct_words: usize,
}

/// Entry counts for the whole vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    /// Per-language counts, in canonical language order.
    pub languages: Vec<LanguageStats>,
    /// Total entries across all languages.
    pub total_entries: usize,
}

impl DictionaryStats {
    /// Compute counts for `vocabulary`.
    #[must_use]
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        let languages = Language::ALL
            .into_iter()
            .map(|language| {
                let entries = vocabulary.entries(language);
                let mut words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
                words.sort_unstable();
                words.dedup();
                LanguageStats {
                    language,
                    entries: entries.len(),
                    distinct_words: words.len(),
                }
            })
            .collect();

        Self {
            languages,
            total_entries: vocabulary.total(),
        }
    }
}
