//! Application state and its transitions.
//!
//! [`AppState`] holds everything the study views show besides the vocabulary
//! itself. Each user event is an [`Action`]; [`AppState::apply`] turns one
//! action into one state change and reports what changed. [`App`] pairs the
//! state with a [`VocabularyStore`] and saves after an action only when the
//! vocabulary changed.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::cards::CardCursor;
use crate::entry::Entry;
use crate::error::Result;
use crate::language::Language;
use crate::query::filter_and_sort;
use crate::store::VocabularyStore;
use crate::vocabulary::Vocabulary;

/// The three views available once a language is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Flashcard game.
    #[default]
    Game,
    /// Searchable, sorted word list.
    Dictionary,
    /// Form for adding a word.
    Add,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game => write!(f, "Game"),
            Self::Dictionary => write!(f, "Dictionary"),
            Self::Add => write!(f, "Add"),
        }
    }
}

/// A single user event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Make `Language` the active language.
    SelectLanguage(Language),
    /// Return to the language selection screen.
    GoHome,
    /// Switch to another view.
    SwitchMode(Mode),
    /// Set the word field of the add form.
    SetWord(String),
    /// Set the meaning field of the add form.
    SetMeaning(String),
    /// Add the word/meaning from the form to the active language.
    AddWord,
    /// Set the typed answer for the current card.
    SetAnswer(String),
    /// Reveal the meaning of the current card.
    Submit,
    /// Move to the next card.
    Next,
    /// Move to the previous card.
    Prev,
    /// Jump to a random card.
    Shuffle,
    /// Set the dictionary search term.
    SetSearch(String),
}

/// Why an action left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// No language is selected yet.
    NoLanguage,
    /// The action belongs to another view.
    WrongMode(Mode),
    /// The active language has no cards.
    EmptyDeck,
    /// Word or meaning is empty.
    MissingInput,
    /// The card already shows its meaning.
    AlreadyFlipped,
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLanguage => write!(f, "select a language first"),
            Self::WrongMode(mode) => write!(f, "only available in the {mode} view"),
            Self::EmptyDeck => write!(f, "no words yet"),
            Self::MissingInput => write!(f, "both word and meaning are required"),
            Self::AlreadyFlipped => write!(f, "card already revealed"),
        }
    }
}

/// Outcome of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The vocabulary changed and must be persisted.
    VocabularyChanged,
    /// Only view state changed.
    ViewChanged,
    /// Nothing changed.
    Ignored(Ignored),
}

impl Transition {
    /// Check whether the vocabulary changed.
    #[must_use]
    pub fn vocabulary_changed(self) -> bool {
        matches!(self, Self::VocabularyChanged)
    }
}

/// View state for the study tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    language: Option<Language>,
    mode: Mode,
    cursor: CardCursor,
    flipped: bool,
    answer: String,
    search: String,
    word: String,
    meaning: String,
}

impl AppState {
    /// Create the initial state: home screen, Game view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active language, `None` on the home screen.
    #[must_use]
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// The current view.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Index of the current card.
    #[must_use]
    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    /// Whether the current card shows its meaning.
    #[must_use]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// The typed answer.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The dictionary search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The pending word of the add form.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The pending meaning of the add form.
    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    /// The card under the cursor.
    #[must_use]
    pub fn current_card<'a>(&self, vocabulary: &'a Vocabulary) -> Option<&'a Entry> {
        let language = self.language?;
        self.cursor.current(vocabulary.entries(language))
    }

    /// The dictionary listing for the active language and search term.
    #[must_use]
    pub fn dictionary(&self, vocabulary: &Vocabulary) -> Vec<Entry> {
        self.language
            .map(|language| filter_and_sort(vocabulary.entries(language), &self.search))
            .unwrap_or_default()
    }

    /// Apply `action`, drawing shuffle positions from the thread RNG.
    pub fn apply(&mut self, vocabulary: &mut Vocabulary, action: Action) -> Transition {
        self.apply_with_rng(vocabulary, action, &mut rand::thread_rng())
    }

    /// Apply `action`, drawing shuffle positions from `rng`.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &mut self,
        vocabulary: &mut Vocabulary,
        action: Action,
        rng: &mut R,
    ) -> Transition {
        match action {
            Action::SelectLanguage(language) => {
                if self.language != Some(language) {
                    self.cursor.reset();
                    self.reset_card();
                }
                self.language = Some(language);
                self.cursor.clamp(vocabulary.len(language));
                Transition::ViewChanged
            }
            Action::GoHome => {
                self.language = None;
                Transition::ViewChanged
            }
            Action::SwitchMode(mode) => {
                if self.language.is_none() {
                    return Transition::Ignored(Ignored::NoLanguage);
                }
                self.mode = mode;
                Transition::ViewChanged
            }
            Action::SetWord(word) => self.in_mode(Mode::Add, |state| state.word = word),
            Action::SetMeaning(meaning) => {
                self.in_mode(Mode::Add, |state| state.meaning = meaning)
            }
            Action::AddWord => self.add_word(vocabulary),
            Action::SetAnswer(answer) => {
                if let Err(ignored) = self.require(Mode::Game) {
                    return Transition::Ignored(ignored);
                }
                if self.flipped {
                    return Transition::Ignored(Ignored::AlreadyFlipped);
                }
                self.answer = answer;
                Transition::ViewChanged
            }
            Action::Submit => {
                let len = match self.deck_len(vocabulary) {
                    Ok(len) => len,
                    Err(ignored) => return Transition::Ignored(ignored),
                };
                if len == 0 {
                    return Transition::Ignored(Ignored::EmptyDeck);
                }
                self.flipped = true;
                Transition::ViewChanged
            }
            Action::Next => self.navigate(vocabulary, CardCursor::next),
            Action::Prev => self.navigate(vocabulary, CardCursor::prev),
            Action::Shuffle => {
                self.navigate(vocabulary, |cursor, len| cursor.shuffle_with(len, rng))
            }
            Action::SetSearch(search) => {
                self.in_mode(Mode::Dictionary, |state| state.search = search)
            }
        }
    }

    fn require(&self, mode: Mode) -> std::result::Result<Language, Ignored> {
        let language = self.language.ok_or(Ignored::NoLanguage)?;
        if self.mode != mode {
            return Err(Ignored::WrongMode(mode));
        }
        Ok(language)
    }

    fn in_mode(&mut self, mode: Mode, change: impl FnOnce(&mut Self)) -> Transition {
        match self.require(mode) {
            Ok(_) => {
                change(self);
                Transition::ViewChanged
            }
            Err(ignored) => Transition::Ignored(ignored),
        }
    }

    fn deck_len(&self, vocabulary: &Vocabulary) -> std::result::Result<usize, Ignored> {
        self.require(Mode::Game)
            .map(|language| vocabulary.len(language))
    }

    fn navigate<F>(&mut self, vocabulary: &Vocabulary, step: F) -> Transition
    where
        F: FnOnce(&mut CardCursor, usize) -> Option<usize>,
    {
        let len = match self.deck_len(vocabulary) {
            Ok(len) => len,
            Err(ignored) => return Transition::Ignored(ignored),
        };
        match step(&mut self.cursor, len) {
            Some(index) => {
                debug!("Moved to card {index} of {len}");
                self.reset_card();
                Transition::ViewChanged
            }
            None => Transition::Ignored(Ignored::EmptyDeck),
        }
    }

    fn add_word(&mut self, vocabulary: &mut Vocabulary) -> Transition {
        let language = match self.require(Mode::Add) {
            Ok(language) => language,
            Err(ignored) => return Transition::Ignored(ignored),
        };
        if !vocabulary.add_word(language, &self.word, &self.meaning) {
            return Transition::Ignored(Ignored::MissingInput);
        }
        self.word.clear();
        self.meaning.clear();
        self.cursor.clamp(vocabulary.len(language));
        Transition::VocabularyChanged
    }

    fn reset_card(&mut self) {
        self.flipped = false;
        self.answer.clear();
    }
}

/// The study tool: view state plus the persistent vocabulary.
#[derive(Debug)]
pub struct App {
    store: VocabularyStore,
    state: AppState,
    rng: StdRng,
}

impl App {
    /// Create an app over `store`, starting on the home screen.
    #[must_use]
    pub fn new(store: VocabularyStore) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Create an app with a fixed shuffle RNG.
    #[must_use]
    pub fn with_rng(store: VocabularyStore, rng: StdRng) -> Self {
        Self {
            store,
            state: AppState::new(),
            rng,
        }
    }

    /// The current view state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The current vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.store.vocabulary()
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    /// Apply one action and persist if it changed the vocabulary.
    ///
    /// A failed save leaves both the vocabulary and the view state as they
    /// were before the action, so typed input survives and can be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if saving the vocabulary fails.
    pub fn dispatch(&mut self, action: Action) -> Result<Transition> {
        let before = self.state.clone();
        let state = &mut self.state;
        let rng = &mut self.rng;
        let mut transition = Transition::ViewChanged;
        let saved = self.store.update(|vocabulary| {
            transition = state.apply_with_rng(vocabulary, action, rng);
            transition.vocabulary_changed()
        });
        if let Err(e) = saved {
            self.state = before;
            return Err(e);
        }
        Ok(transition)
    }
}
