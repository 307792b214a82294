//! `vocabdeck` - A flashcard vocabulary trainer
//!
//! This library provides a per-language vocabulary of word/meaning pairs,
//! persisted to a local `SQLite` key-value store, together with the flashcard
//! game, dictionary search and add-word flows built on top of it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cards;
pub mod cli;
pub mod collation;
pub mod config;
pub mod entry;
pub mod error;
pub mod language;
pub mod logging;
pub mod query;
pub mod shell;
pub mod storage;
pub mod store;
pub mod vocabulary;

pub use app::{Action, App, AppState, Mode, Transition};
pub use config::Config;
pub use entry::Entry;
pub use error::{Error, Result};
pub use language::Language;
pub use logging::init_logging;
pub use query::{filter_and_sort, DictionaryStats};
pub use storage::{Storage, StorageStats};
pub use store::VocabularyStore;
pub use vocabulary::Vocabulary;
