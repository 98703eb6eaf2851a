//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, service protocol).
//!
//! # Coordinates
//!
//! Cells are addressed by `(row, col)`, both 0-indexed from the top-left corner.
//! A word is addressed by its start cell plus its [`Direction`].
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CORRECT_LETTER_POINTS` | 1 | Awarded for every correct letter entry |
//! | `WRONG_LETTER_PENALTY` | 1 | Deducted for every wrong letter entry |
//! | `REVEAL_PENALTY_PER_CELL` | 2 | Deducted per newly revealed blank/wrong cell |
//!
//! Scores never drop below zero; every deduction saturates.
//!
//! # Generation Request Limits
//!
//! The generation service clamps what it is asked for; requests are normalized
//! the same way before they are sent:
//!
//! - grid size: `MIN_GRID_SIZE..=MAX_GRID_SIZE` (5..=21)
//! - word count: `MIN_WORD_COUNT..=MAX_WORD_COUNT` (10..=40), then capped by
//!   [`max_words_for_size`]
//!
//! # Examples
//!
//! ```
//! use tui_crossword_types::{CellKey, Direction, format_elapsed};
//!
//! let dir = Direction::from_str("Across").unwrap();
//! assert_eq!(dir.toggle(), Direction::Down);
//!
//! let cell = CellKey::new(0, 2);
//! assert_eq!(cell.step(Direction::Down, 2), CellKey::new(2, 2));
//!
//! assert_eq!(format_elapsed(75), "1:15");
//! ```

/// Points awarded for a correct letter entry.
pub const CORRECT_LETTER_POINTS: u32 = 1;

/// Points deducted for a wrong letter entry.
pub const WRONG_LETTER_PENALTY: u32 = 1;

/// Points deducted for each cell a reveal exposes that was blank or wrong.
pub const REVEAL_PENALTY_PER_CELL: u32 = 2;

/// Session timer period in milliseconds (one tick per second).
pub const TIMER_TICK_MS: u64 = 1000;

/// Smallest grid the generation service produces.
pub const MIN_GRID_SIZE: u32 = 5;

/// Largest grid the generation service produces.
pub const MAX_GRID_SIZE: u32 = 21;

/// Lower bound of the requested word count.
pub const MIN_WORD_COUNT: u32 = 10;

/// Upper bound of the requested word count.
pub const MAX_WORD_COUNT: u32 = 40;

/// Grid size used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: u32 = 15;

/// Word count used when nothing else is configured.
pub const DEFAULT_WORD_COUNT: u32 = 22;

/// Upper bound on the word count that still fits a `size`×`size` grid.
///
/// Small grids get a more generous ratio.
///
/// ```
/// use tui_crossword_types::max_words_for_size;
///
/// assert_eq!(max_words_for_size(5), 6);
/// assert_eq!(max_words_for_size(15), 32);
/// ```
pub fn max_words_for_size(size: u32) -> u32 {
    if size <= 5 {
        (size * size) / 4
    } else {
        (size * size) / 7
    }
}

/// Format elapsed seconds as `m:ss`.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Word direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Direction {
    #[default]
    Across,
    Down,
}

impl Direction {
    /// Parse a direction (case-insensitive, "across"/"a" or "down"/"d").
    ///
    /// ```
    /// use tui_crossword_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("down"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("A"), Some(Direction::Across));
    /// assert_eq!(Direction::from_str("diagonal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "across" | "a" => Some(Direction::Across),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    /// Single-letter suffix used in clue labels ("12A", "3D").
    pub fn suffix(&self) -> char {
        match self {
            Direction::Across => 'A',
            Direction::Down => 'D',
        }
    }

    /// The other direction.
    pub fn toggle(&self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

/// A grid cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: usize,
    pub col: usize,
}

impl CellKey {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell `offset` steps away in `dir`.
    pub fn step(&self, dir: Direction, offset: usize) -> Self {
        match dir {
            Direction::Across => Self::new(self.row, self.col + offset),
            Direction::Down => Self::new(self.row + offset, self.col),
        }
    }

    /// Like [`CellKey::step`], but `None` when the coordinate overflows.
    pub fn checked_step(&self, dir: Direction, offset: usize) -> Option<Self> {
        match dir {
            Direction::Across => Some(Self::new(self.row, self.col.checked_add(offset)?)),
            Direction::Down => Some(Self::new(self.row.checked_add(offset)?, self.col)),
        }
    }
}

/// A word address: start cell plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordKey {
    pub row: usize,
    pub col: usize,
    pub dir: Direction,
}

impl WordKey {
    pub const fn new(row: usize, col: usize, dir: Direction) -> Self {
        Self { row, col, dir }
    }

    pub fn start(&self) -> CellKey {
        CellKey::new(self.row, self.col)
    }
}

/// Arrow key directions for selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// Events that can be applied to a crossword session
///
/// These are produced by keyboard and mouse input and consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosswordAction {
    /// Click on the grid cell at `(row, col)`
    ClickCell { row: usize, col: usize },
    /// Click on an entry of the across/down clue lists
    ClickClue { row: usize, col: usize, dir: Direction },
    /// Type a letter into the selected cell
    EnterLetter(char),
    /// Flip the selected direction (Tab)
    ToggleDirection,
    /// Move the selection by one cell
    Move(Arrow),
    /// Reveal the word under the selection
    RevealWord,
    /// Reveal the whole puzzle and end the session
    RevealAll,
}

/// A grid size preset offered by the player UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub size: u32,
    pub word_count: u32,
    pub label: &'static str,
}

/// Size presets with recommended word counts.
pub const SIZE_PRESETS: [SizePreset; 5] = [
    SizePreset {
        size: 5,
        word_count: 6,
        label: "5x5 (Easy)",
    },
    SizePreset {
        size: 9,
        word_count: 14,
        label: "9x9 (Small)",
    },
    SizePreset {
        size: 15,
        word_count: 22,
        label: "15x15 (Standard)",
    },
    SizePreset {
        size: 19,
        word_count: 32,
        label: "19x19 (Large)",
    },
    SizePreset {
        size: 21,
        word_count: 38,
        label: "21x21 (Challenge)",
    },
];

impl SizePreset {
    /// Index of the preset for `size`, if there is one.
    pub fn index_of(size: u32) -> Option<usize> {
        SIZE_PRESETS.iter().position(|p| p.size == size)
    }

    /// The preset after `index`, wrapping around.
    pub fn next(index: usize) -> (usize, SizePreset) {
        let i = (index + 1) % SIZE_PRESETS.len();
        (i, SIZE_PRESETS[i])
    }
}
