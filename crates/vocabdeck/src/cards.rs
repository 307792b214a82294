//! Circular card cursor for the study game.
//!
//! The cursor is an index into the active language's entries. Every move is
//! guarded on an empty list: it returns `None` and leaves the index alone.

use rand::Rng;

use crate::entry::Entry;

/// Index of the card after `index` in a list of `len`, wrapping around.
#[must_use]
pub fn next_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index + 1) % len)
}

/// Index of the card before `index` in a list of `len`, wrapping around.
#[must_use]
pub fn prev_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + len - 1) % len)
}

/// Position in the active card list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardCursor {
    index: usize,
}

impl CardCursor {
    /// Create a cursor at the first card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next card.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        let index = next_index(self.index, len)?;
        self.index = index;
        Some(index)
    }

    /// Move to the previous card.
    pub fn prev(&mut self, len: usize) -> Option<usize> {
        let index = prev_index(self.index, len)?;
        self.index = index;
        Some(index)
    }

    /// Jump to a uniformly random card.
    pub fn shuffle(&mut self, len: usize) -> Option<usize> {
        self.shuffle_with(len, &mut rand::thread_rng())
    }

    /// Jump to a uniformly random card drawn from `rng`.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = rng.gen_range(0..len);
        Some(self.index)
    }

    /// Pull the index back into `[0, len)` after the list changed.
    ///
    /// An empty list parks the cursor at 0.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    /// Return to the first card.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The entry under the cursor, if any.
    #[must_use]
    pub fn current<'a>(&self, entries: &'a [Entry]) -> Option<&'a Entry> {
        entries.get(self.index)
    }
}
