//! Puzzle catalog
//!
//! The fixed group definitions of a puzzle, validated once at load time, plus
//! the shuffling used to lay out a fresh board.

mod embedded;
pub mod loader;
mod shuffle;

pub use shuffle::{shuffle, shuffled_words};

use crate::core::{GROUP_SIZE, Group, GroupColor, NUM_GROUPS};
use rustc_hash::FxHashMap;
use std::io;
use thiserror::Error;

/// Reasons a puzzle definition is rejected
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("puzzle must have exactly {expected} groups, got {actual}")]
    GroupCount { expected: usize, actual: usize },

    #[error("group '{category}' must have exactly {expected} words, got {actual}")]
    GroupSize {
        category: String,
        expected: usize,
        actual: usize,
    },

    #[error("group #{index} has an empty category")]
    EmptyCategory { index: usize },

    #[error("group '{category}' contains an empty word")]
    EmptyWord { category: String },

    #[error("word '{word}' appears more than once in the puzzle")]
    DuplicateWord { word: String },

    #[error("failed to read puzzle file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse puzzle file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A validated puzzle: exactly [`NUM_GROUPS`] groups of [`GROUP_SIZE`] unique words
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: Vec<Group>,
    // lowercased word -> (group index, position in group)
    index: FxHashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Validate and index a set of groups
    ///
    /// # Errors
    /// Returns `CatalogError` if the group count or any group size is wrong, a
    /// category or word is blank, or a word appears twice (ignoring case).
    pub fn new(groups: Vec<Group>) -> Result<Self, CatalogError> {
        if groups.len() != NUM_GROUPS {
            return Err(CatalogError::GroupCount {
                expected: NUM_GROUPS,
                actual: groups.len(),
            });
        }

        let mut index = FxHashMap::default();
        for (group_index, group) in groups.iter().enumerate() {
            if group.category().trim().is_empty() {
                return Err(CatalogError::EmptyCategory { index: group_index });
            }

            if group.words().len() != GROUP_SIZE {
                return Err(CatalogError::GroupSize {
                    category: group.category().to_string(),
                    expected: GROUP_SIZE,
                    actual: group.words().len(),
                });
            }

            for (position, word) in group.words().iter().enumerate() {
                if word.trim().is_empty() {
                    return Err(CatalogError::EmptyWord {
                        category: group.category().to_string(),
                    });
                }

                if index
                    .insert(word.trim().to_lowercase(), (group_index, position))
                    .is_some()
                {
                    return Err(CatalogError::DuplicateWord { word: word.clone() });
                }
            }
        }

        Ok(Self { groups, index })
    }

    /// The puzzle compiled into the binary
    ///
    /// # Panics
    /// Will not panic - the embedded groups are checked by the test suite.
    #[must_use]
    pub fn default_puzzle() -> Self {
        let groups = embedded::DEFAULT_PUZZLE
            .iter()
            .map(|(category, words, color)| Group::new(*category, *words, GroupColor::new(*color)))
            .collect();

        Self::new(groups).expect("embedded puzzle is valid")
    }

    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[inline]
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Total number of words on a full board
    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.index.len()
    }

    /// Look a word up ignoring case
    ///
    /// Returns the word as spelled in the puzzle and the index of its group.
    ///
    /// # Examples
    /// ```
    /// use connections::catalog::Catalog;
    ///
    /// let catalog = Catalog::default_puzzle();
    /// assert_eq!(catalog.resolve("pyry"), Some(("PYRY", 1)));
    /// assert_eq!(catalog.resolve("nope"), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, word: &str) -> Option<(&str, usize)> {
        let &(group_index, position) = self.index.get(&word.trim().to_lowercase())?;
        let canonical = self.groups[group_index].words()[position].as_str();
        Some((canonical, group_index))
    }

    /// Index of the group a word belongs to
    #[inline]
    #[must_use]
    pub fn group_of(&self, word: &str) -> Option<usize> {
        self.resolve(word).map(|(_, group_index)| group_index)
    }
}
