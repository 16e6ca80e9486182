//! Connections
//!
//! A word-grouping puzzle: sixteen words hide four groups of four, and the
//! player has five mistakes to find them all.
//!
//! # Quick Start
//!
//! ```rust
//! use connections::catalog::Catalog;
//! use connections::core::{GuessOutcome, Session};
//!
//! let catalog = Catalog::default_puzzle();
//! let mut session = Session::seeded(&catalog, 7);
//!
//! for word in ["PYRY", "KIPINÄ", "SIPSU", "MASKOTTI"] {
//!     session.toggle_select(word);
//! }
//!
//! let outcome = session.submit_guess();
//! assert_eq!(outcome, Some(GuessOutcome::Correct { group_index: 1, is_final: false }));
//! assert_eq!(session.remaining_words().count(), 12);
//! ```

// Core domain types and the game state machine
pub mod core;

// Puzzle definitions and shuffling
pub mod catalog;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
