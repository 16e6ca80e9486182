//! Core domain types for the puzzle
//!
//! Groups, board entries, guess evaluation and the game session state machine.
//! Nothing in here knows how the game is rendered.

mod group;
mod guess;
mod session;

pub use group::{Group, GroupColor, WordEntry};
pub use guess::{GroupTally, GuessKey};
pub use session::{GuessOutcome, Session, SessionStatus};

/// Mistakes a player may make before the game is lost
pub const MAX_LIVES: u8 = 5;

/// Words that make up one guess
pub const MAX_SELECTED: usize = 4;

/// Hidden groups per puzzle
pub const NUM_GROUPS: usize = 4;

/// Words per group
pub const GROUP_SIZE: usize = 4;
