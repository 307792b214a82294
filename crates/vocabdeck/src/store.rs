//! Persistent vocabulary store.
//!
//! `VocabularyStore` owns the storage backend and the in-memory
//! [`Vocabulary`]. It loads once on open and writes the whole vocabulary back
//! under a single key after every mutation.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::language::Language;
use crate::storage::Storage;
use crate::vocabulary::Vocabulary;

/// Default key the vocabulary is stored under.
pub const DEFAULT_STORE_KEY: &str = "vocab";

/// The vocabulary together with the storage it persists to.
#[derive(Debug)]
pub struct VocabularyStore {
    storage: Storage,
    key: String,
    vocabulary: Vocabulary,
}

impl VocabularyStore {
    /// Open the store, loading whatever is persisted under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend cannot be read. Missing or
    /// malformed data yields an empty vocabulary.
    pub fn open(storage: Storage, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let vocabulary = load(&storage, &key)?;
        Ok(Self {
            storage,
            key,
            vocabulary,
        })
    }

    /// The current vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The backing storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The key the vocabulary is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist the current vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<()> {
        save(&self.storage, &self.key, &self.vocabulary)
    }

    /// Run one mutation against the vocabulary as a single transaction.
    ///
    /// `mutate` reports whether it changed anything; the vocabulary is saved
    /// exactly once when it did and not at all otherwise. If the save fails
    /// the in-memory vocabulary is rolled back, so it never runs ahead of
    /// what is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn update<F>(&mut self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut Vocabulary) -> bool,
    {
        let before = self.vocabulary.clone();
        if !mutate(&mut self.vocabulary) {
            return Ok(false);
        }
        if let Err(e) = self.save() {
            warn!("Save under '{}' failed, rolling back: {e}", self.key);
            self.vocabulary = before;
            return Err(e);
        }
        Ok(true)
    }

    /// Append a word to `language` and persist.
    ///
    /// Returns `false` without writing anything if either side is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_word(&mut self, language: Language, word: &str, meaning: &str) -> Result<bool> {
        let added = self.update(|vocabulary| vocabulary.add_word(language, word, meaning))?;
        if added {
            info!("Added '{word}' to {language}");
        }
        Ok(added)
    }
}

/// Read the vocabulary stored under `key`.
///
/// Absent, damaged or unparsable values all yield the empty vocabulary; only
/// backend failures are reported.
///
/// # Errors
///
/// Returns an error if the database read fails.
pub fn load(storage: &Storage, key: &str) -> Result<Vocabulary> {
    let Some(stored) = storage.get(key)? else {
        debug!("No vocabulary stored under '{key}', starting empty");
        return Ok(Vocabulary::default());
    };

    if !stored.is_intact() {
        warn!("Stored vocabulary under '{key}' failed its hash check, starting empty");
        return Ok(Vocabulary::default());
    }

    match serde_json::from_str::<Vocabulary>(&stored.value) {
        Ok(vocabulary) => {
            debug!("Loaded {} entries from '{key}'", vocabulary.total());
            Ok(vocabulary)
        }
        Err(e) => {
            warn!("Stored vocabulary under '{key}' is malformed ({e}), starting empty");
            Ok(Vocabulary::default())
        }
    }
}

/// Serialize `vocabulary` and write it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save(storage: &Storage, key: &str, vocabulary: &Vocabulary) -> Result<()> {
    let json = serde_json::to_string(vocabulary)?;
    storage.set(key, &json)?;
    debug!("Saved {} entries under '{key}'", vocabulary.total());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    fn storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn load_raw(raw: &str) -> Vocabulary {
        let storage = storage();
        storage.set(DEFAULT_STORE_KEY, raw).unwrap();
        load(&storage, DEFAULT_STORE_KEY).unwrap()
    }

    #[test]
    fn test_load_absent_is_default() {
        assert_eq!(load(&storage(), DEFAULT_STORE_KEY).unwrap(), Vocabulary::default());
    }

    #[test]
    fn test_load_malformed_is_default() {
        for raw in [
            "not json",
            "",
            "null",
            "[]",
            "42",
            r#"{"English": "cat"}"#,
            r#"{"English": [{"word": "cat"}]}"#,
            r#"{"English": null}"#,
            r#"{"French": [{"word": 1, "meaning": "x"}]}"#,
        ] {
            assert_eq!(load_raw(raw), Vocabulary::default(), "input: {raw}");
        }
    }

    #[test]
    fn test_load_hash_mismatch_is_default() {
        let storage = storage();
        let valid = r#"{"English":[{"word":"cat","meaning":"chat"}],"French":[],"German":[]}"#;
        storage
            .set_with_hash(DEFAULT_STORE_KEY, valid, "bogus")
            .unwrap();
        assert_eq!(
            load(&storage, DEFAULT_STORE_KEY).unwrap(),
            Vocabulary::default()
        );
    }

    #[test]
    fn test_load_reproduces_well_formed_json() {
        let raw = r#"{"English":[{"word":"cat","meaning":"chat"},{"word":"cat","meaning":"chat"}],"French":[{"word":"chien","meaning":"dog"}],"German":[]}"#;
        let vocabulary = load_raw(raw);
        assert_eq!(serde_json::to_string(&vocabulary).unwrap(), raw);
    }

    #[test]
    fn test_load_partial_object_fills_missing() {
        let vocabulary = load_raw(r#"{"German":[{"word":"Hund","meaning":"dog"}]}"#);
        assert_eq!(
            vocabulary.entries(Language::German),
            &[Entry::new("Hund", "dog")]
        );
        assert!(vocabulary.entries(Language::English).is_empty());
        assert!(vocabulary.entries(Language::French).is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let storage = storage();
        let vocabulary = Vocabulary::new()
            .with_word(Language::English, "house", "maison")
            .with_word(Language::German, "Straße", "street");
        save(&storage, "custom", &vocabulary).unwrap();

        assert_eq!(load(&storage, "custom").unwrap(), vocabulary);
        assert!(storage.get(DEFAULT_STORE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_add_word_persists() {
        let storage = storage();
        let mut store = VocabularyStore::open(storage, DEFAULT_STORE_KEY).unwrap();

        assert!(store.add_word(Language::French, "cat", "chat").unwrap());

        let reloaded = load(store.storage(), store.key()).unwrap();
        assert_eq!(reloaded.entries(Language::French), &[Entry::new("cat", "chat")]);
    }

    #[test]
    fn test_add_empty_does_not_write() {
        let mut store = VocabularyStore::open(storage(), DEFAULT_STORE_KEY).unwrap();

        assert!(!store.add_word(Language::English, "", "meaning").unwrap());
        assert!(!store.add_word(Language::English, "word", "").unwrap());

        assert!(store.storage().get(DEFAULT_STORE_KEY).unwrap().is_none());
        assert!(store.vocabulary().is_empty());
    }

    #[test]
    fn test_update_saves_only_on_change() {
        let mut store = VocabularyStore::open(storage(), DEFAULT_STORE_KEY).unwrap();

        assert!(!store.update(|_| false).unwrap());
        assert!(store.storage().get(DEFAULT_STORE_KEY).unwrap().is_none());

        let changed = store
            .update(|vocabulary| vocabulary.add_word(Language::German, "Baum", "tree"))
            .unwrap();
        assert!(changed);
        let stored = store.storage().get(DEFAULT_STORE_KEY).unwrap().unwrap();
        assert!(stored.value.contains("Baum"));
    }

    #[test]
    fn test_load_ignores_unknown_top_level_keys() {
        let vocabulary = load_raw(
            r#"{"English":[{"word":"cat","meaning":"chat"}],"Spanish":[{"word":"gato","meaning":"cat"}]}"#,
        );
        assert_eq!(
            vocabulary.entries(Language::English),
            &[Entry::new("cat", "chat")]
        );
        assert_eq!(vocabulary.total(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut store = VocabularyStore::open(storage(), DEFAULT_STORE_KEY).unwrap();
        store.add_word(Language::German, "Katze", "cat").unwrap();
        store.storage().drop_kv_table().unwrap();

        assert!(store.add_word(Language::German, "Hund", "dog").is_err());
        assert_eq!(
            store.vocabulary().entries(Language::German),
            &[Entry::new("Katze", "cat")]
        );
    }

    #[test]
    fn test_reopen_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");

        {
            let mut store =
                VocabularyStore::open(Storage::open(&path).unwrap(), DEFAULT_STORE_KEY).unwrap();
            store.add_word(Language::English, "dog", "chien").unwrap();
            store.add_word(Language::English, "cat", "chat").unwrap();
        }

        let store =
            VocabularyStore::open(Storage::open(&path).unwrap(), DEFAULT_STORE_KEY).unwrap();
        assert_eq!(
            store.vocabulary().entries(Language::English),
            &[Entry::new("dog", "chien"), Entry::new("cat", "chat")]
        );
    }
}
