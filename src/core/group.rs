//! Puzzle groups and board entries
//!
//! A `Group` is one hidden category: a label, its member words and the color
//! it is revealed in. A `WordEntry` is one tile on the shuffled board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color of a group
///
/// Opaque to the game rules. Front ends decode it with [`GroupColor::rgb`];
/// the puzzle format uses `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupColor(String);

impl GroupColor {
    /// Yellow, the easiest group
    pub const YELLOW: &'static str = "#f9df6d";
    /// Green
    pub const GREEN: &'static str = "#a0c35a";
    /// Blue
    pub const BLUE: &'static str = "#b0c4ef";
    /// Purple, the hardest group
    pub const PURPLE: &'static str = "#ba81c5";

    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw color token
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode a `#rrggbb` (or `rrggbb`) token into its RGB components
    ///
    /// Returns `None` for anything else.
    ///
    /// # Examples
    /// ```
    /// use connections::core::GroupColor;
    ///
    /// assert_eq!(GroupColor::new("#f9df6d").rgb(), Some((0xf9, 0xdf, 0x6d)));
    /// assert_eq!(GroupColor::new("yellow").rgb(), None);
    /// ```
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#').unwrap_or(&self.0);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One hidden category of related words
///
/// Groups are only constructed loosely here; the word count and uniqueness
/// rules are enforced when a [`Catalog`](crate::catalog::Catalog) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    category: String,
    words: Vec<String>,
    color: GroupColor,
}

impl Group {
    #[must_use]
    pub fn new<I, S>(category: impl Into<String>, words: I, color: GroupColor) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            words: words.into_iter().map(Into::into).collect(),
            color,
        }
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> &GroupColor {
        &self.color
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.words.join(", "))
    }
}

/// A word on the board together with the index of the group it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordEntry {
    pub word: String,
    pub group_index: usize,
}

impl WordEntry {
    #[must_use]
    pub fn new(word: impl Into<String>, group_index: usize) -> Self {
        Self {
            word: word.into(),
            group_index,
        }
    }
}
