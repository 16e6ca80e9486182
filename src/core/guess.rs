//! Guess evaluation
//!
//! A guess is four board words. It is identified by a canonical key so the same
//! combination can be recognised regardless of selection order, and scored by
//! tallying how many of its words fall into each group.

use super::{GROUP_SIZE, NUM_GROUPS};
use std::fmt;

/// Canonical identity of a word combination
///
/// The words are sorted lexically and joined with `,`, so any ordering of the
/// same words yields the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuessKey(String);

impl GuessKey {
    /// Build the key for a set of words
    ///
    /// # Examples
    /// ```
    /// use connections::core::GuessKey;
    ///
    /// let a = GuessKey::from_words(["PYRY", "KIPINÄ", "SIPSU", "MASKOTTI"]);
    /// let b = GuessKey::from_words(["SIPSU", "PYRY", "MASKOTTI", "KIPINÄ"]);
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str(), "KIPINÄ,MASKOTTI,PYRY,SIPSU");
    /// ```
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = words.into_iter().map(|w| w.as_ref().to_string()).collect();
        sorted.sort_unstable();
        Self(sorted.join(","))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-group count of the words in a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupTally([u8; NUM_GROUPS]);

impl GroupTally {
    /// Tally group indices
    ///
    /// Indices outside `0..NUM_GROUPS` are ignored.
    #[must_use]
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut counts = [0u8; NUM_GROUPS];
        for index in indices {
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }
        Self(counts)
    }

    /// The group every guessed word belongs to, if there is one
    ///
    /// Groups are disjoint, so at most one group can reach a full count.
    #[must_use]
    pub fn complete_group(&self) -> Option<usize> {
        self.0.iter().position(|&count| usize::from(count) == GROUP_SIZE)
    }

    /// Highest count over all groups
    #[inline]
    #[must_use]
    pub fn max_count(&self) -> u8 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Exactly one word short of a full group
    #[inline]
    #[must_use]
    pub fn is_one_away(&self) -> bool {
        usize::from(self.max_count()) == GROUP_SIZE - 1
    }
}
