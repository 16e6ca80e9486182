//! Game session state machine
//!
//! A `Session` owns everything that changes during one game: the shuffled
//! board, the current selection, the groups found so far, remaining lives and
//! the combinations already submitted. It is driven only through its intents
//! (`toggle_select`, `deselect_all`, `submit_guess`, `reset`); front ends read
//! it back through the accessor methods and react to the returned
//! [`GuessOutcome`].
//!
//! Invalid intents are silent no-ops rather than errors. Front ends are
//! expected to disable the matching controls, but the session stays correct
//! if they don't.

use super::{Group, GroupTally, GuessKey, MAX_LIVES, MAX_SELECTED, NUM_GROUPS, WordEntry};
use crate::catalog::{Catalog, shuffled_words};
use rand::{SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    /// Terminal. Only [`Session::reset`] starts a new game.
    Over { won: bool },
}

/// Result of a scored guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// All four words share a group
    Correct {
        group_index: usize,
        /// This was the last hidden group; the game is won
        is_final: bool,
    },
    /// The words span several groups; one life was lost
    Incorrect {
        /// Exactly three of the four words share a group
        one_away: bool,
        lives_remaining: u8,
    },
}

/// One game of the puzzle
#[derive(Debug, Clone)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    rng: StdRng,
    words: Vec<WordEntry>,
    selected: FxHashSet<String>,
    found: Vec<usize>,
    lives: u8,
    guessed: FxHashSet<GuessKey>,
    status: SessionStatus,
    input_locked: bool,
    generation: u64,
}

impl<'a> Session<'a> {
    /// Start a game, drawing the board order from `rng`
    #[must_use]
    pub fn new(catalog: &'a Catalog, mut rng: StdRng) -> Self {
        let words = shuffled_words(catalog, &mut rng);

        Self {
            catalog,
            rng,
            words,
            selected: FxHashSet::default(),
            found: Vec::with_capacity(NUM_GROUPS),
            lives: MAX_LIVES,
            guessed: FxHashSet::default(),
            status: SessionStatus::Playing,
            input_locked: false,
            generation: 0,
        }
    }

    /// Start a game whose board order is fully determined by `seed`
    #[must_use]
    pub fn seeded(catalog: &'a Catalog, seed: u64) -> Self {
        Self::new(catalog, StdRng::seed_from_u64(seed))
    }

    /// Start a game seeded from the thread-local generator
    #[must_use]
    pub fn from_entropy(catalog: &'a Catalog) -> Self {
        Self::new(catalog, StdRng::from_rng(&mut rand::rng()))
    }

    // ---------------------------------------------------------------------
    // Intents
    // ---------------------------------------------------------------------

    /// Select a word, or deselect it if it is already selected
    ///
    /// Ignored when the game is over, input is locked, the word is not on the
    /// board (lookup ignores case), its group has been found, or the selection
    /// is already full. Returns whether the selection changed.
    pub fn toggle_select(&mut self, word: &str) -> bool {
        if !self.is_playing() || self.input_locked {
            return false;
        }

        let catalog = self.catalog;
        let Some((canonical, group_index)) = catalog.resolve(word) else {
            return false;
        };

        if self.found.contains(&group_index) {
            return false;
        }

        if self.selected.remove(canonical) {
            tracing::debug!(word = canonical, "deselected");
            return true;
        }

        if self.selected.len() < MAX_SELECTED {
            self.selected.insert(canonical.to_string());
            tracing::debug!(word = canonical, selected = self.selected.len(), "selected");
            return true;
        }

        false
    }

    /// Clear the selection
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Score the current selection
    ///
    /// Does nothing and returns `None` unless the game is in progress and
    /// exactly [`MAX_SELECTED`] words are selected. The combination is
    /// recorded whatever the result; resubmitting a recorded combination is
    /// not rejected here, front ends check [`Session::is_already_guessed`].
    ///
    /// A complete group is moved to the found list and the selection cleared;
    /// finding the last group wins the game. Anything else costs a life, and
    /// losing the last life ends the game with every unfound group revealed
    /// in catalog order.
    pub fn submit_guess(&mut self) -> Option<GuessOutcome> {
        if !self.is_playing() || self.selected.len() != MAX_SELECTED {
            return None;
        }

        let key = GuessKey::from_words(&self.selected);
        if !self.guessed.insert(key.clone()) {
            tracing::debug!(guess = %key, "combination submitted again");
        }

        let catalog = self.catalog;
        let tally = GroupTally::from_indices(
            self.selected
                .iter()
                .filter_map(|word| catalog.group_of(word)),
        );

        if let Some(group_index) = tally.complete_group() {
            // Groups are disjoint, so a complete group can't already be found
            let is_final = self.found.len() == NUM_GROUPS - 1;
            self.found.push(group_index);
            self.selected.clear();

            if is_final {
                self.status = SessionStatus::Over { won: true };
                tracing::info!(lives = self.lives, "puzzle solved");
            } else {
                tracing::info!(guess = %key, group = group_index, "group found");
            }

            return Some(GuessOutcome::Correct {
                group_index,
                is_final,
            });
        }

        let one_away = tally.is_one_away();
        self.lives = self.lives.saturating_sub(1);
        tracing::info!(guess = %key, one_away, lives = self.lives, "incorrect guess");

        if self.lives == 0 {
            self.reveal_remaining();
            self.selected.clear();
            self.status = SessionStatus::Over { won: false };
            tracing::info!("out of lives");
        }

        Some(GuessOutcome::Incorrect {
            one_away,
            lives_remaining: self.lives,
        })
    }

    /// Throw the current game away and deal a freshly shuffled board
    ///
    /// Bumps [`Session::generation`] so callbacks scheduled against the old
    /// game can be recognised as stale.
    pub fn reset(&mut self) {
        self.words = shuffled_words(self.catalog, &mut self.rng);
        self.selected.clear();
        self.found.clear();
        self.lives = MAX_LIVES;
        self.guessed.clear();
        self.status = SessionStatus::Playing;
        self.input_locked = false;
        self.generation = self.generation.wrapping_add(1);

        tracing::info!(generation = self.generation, "new game");
    }

    /// Lock or unlock word selection around transient feedback
    pub const fn set_input_locked(&mut self, locked: bool) {
        self.input_locked = locked;
    }

    fn reveal_remaining(&mut self) {
        for group_index in 0..self.catalog.groups().len() {
            if !self.found.contains(&group_index) {
                self.found.push(group_index);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The full shuffled board, found words included
    #[inline]
    #[must_use]
    pub fn board(&self) -> &[WordEntry] {
        &self.words
    }

    /// Board words whose group has not been found, in board order
    pub fn remaining_words(&self) -> impl Iterator<Item = &WordEntry> + '_ {
        self.words
            .iter()
            .filter(|entry| !self.found.contains(&entry.group_index))
    }

    #[inline]
    #[must_use]
    pub const fn selected(&self) -> &FxHashSet<String> {
        &self.selected
    }

    #[inline]
    #[must_use]
    pub fn is_selected(&self, word: &str) -> bool {
        self.selected.contains(word)
    }

    /// Found groups in the order they were found (or revealed)
    pub fn found_groups(&self) -> impl Iterator<Item = &'a Group> + '_ {
        let catalog = self.catalog;
        self.found.iter().filter_map(move |&index| catalog.group(index))
    }

    #[inline]
    #[must_use]
    pub fn found_group_indices(&self) -> &[usize] {
        &self.found
    }

    #[inline]
    #[must_use]
    pub const fn lives_remaining(&self) -> u8 {
        self.lives
    }

    #[inline]
    #[must_use]
    pub const fn mistakes_made(&self) -> u8 {
        MAX_LIVES - self.lives
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.status, SessionStatus::Playing)
    }

    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.status, SessionStatus::Over { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_won(&self) -> bool {
        matches!(self.status, SessionStatus::Over { won: true })
    }

    /// The current selection is full and has been submitted before
    #[must_use]
    pub fn is_already_guessed(&self) -> bool {
        self.selected.len() == MAX_SELECTED
            && self.guessed.contains(&GuessKey::from_words(&self.selected))
    }

    /// Number of distinct combinations submitted this game
    #[inline]
    #[must_use]
    pub fn guessed_count(&self) -> usize {
        self.guessed.len()
    }

    /// Whether a submit control should be enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_playing()
            && !self.input_locked
            && self.selected.len() == MAX_SELECTED
            && !self.is_already_guessed()
    }

    #[inline]
    #[must_use]
    pub const fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Incremented by every [`Session::reset`]
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
