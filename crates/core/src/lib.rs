//! Core engine module - pure, deterministic, and testable
//!
//! This module contains the crossword interaction rules: the puzzle model, word
//! resolution, selection, letter entry and scoring, reveals and completion.
//! It has **no dependencies** on terminals, networking, or I/O, making it:
//!
//! - **Deterministic**: the same event sequence always yields the same state
//! - **Testable**: every rule can be exercised without a rendering harness
//! - **Portable**: can drive a terminal, GUI, or headless player
//!
//! # Module Structure
//!
//! - [`puzzle`]: immutable grid + placements, validation, cell numbering
//! - [`resolver`]: which words cover a cell, preferred word, word cells
//! - [`selection`]: selected cell/direction state machine
//! - [`scoring`]: entry scoring, reveal penalties, completion recompute
//! - [`session`]: mutable per-puzzle session state and event dispatch
//! - [`reveal`]: word and whole-puzzle reveals
//! - [`snapshot`]: read-only view handed to renderers
//! - [`host`]: loading lifecycle around sessions
//!
//! # Game Rules
//!
//! - **Entry**: a correct letter scores +1, a wrong one -1 (never below zero)
//! - **Reveal**: each revealed cell that was blank or wrong costs 2 points;
//!   revealed cells are locked
//! - **Completion**: a word is complete when every cell matches the solution;
//!   the session finishes when every word is complete, or on a full reveal
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tui_crossword_core::{Placement, Puzzle, SessionState};
//! use tui_crossword_types::{CrosswordAction, Direction};
//!
//! let puzzle = Puzzle::from_ascii_rows(
//!     &["CAT", "..A", "..N"],
//!     vec![
//!         Placement::new(0, 0, Direction::Across, "CAT", "feline"),
//!         Placement::new(0, 2, Direction::Down, "TAN", "color"),
//!     ],
//! )
//! .unwrap();
//!
//! let mut session = SessionState::new(Arc::new(puzzle), 1);
//! session.apply_action(CrosswordAction::ClickCell { row: 0, col: 0 });
//! for ch in ['c', 'a', 't'] {
//!     session.apply_action(CrosswordAction::EnterLetter(ch));
//! }
//! assert_eq!(session.score(), 3);
//! assert!(session.is_word_complete(Placement::new(0, 0, Direction::Across, "CAT", "").key()));
//! ```

pub mod error;
pub mod host;
pub mod puzzle;
pub mod resolver;
pub mod reveal;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod snapshot;

pub use tui_crossword_types as types;

// Re-export commonly used types for convenience
pub use error::{LoadError, PuzzleError};
pub use host::{LoadOutcome, SessionHost};
pub use puzzle::{number_cells, Placement, Puzzle};
pub use resolver::WordsAt;
pub use scoring::{cell_correctness, CompletionUpdate};
pub use selection::Selection;
pub use session::SessionState;
pub use snapshot::SessionSnapshot;
