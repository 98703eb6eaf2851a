//! Error types for puzzle construction and loading.

use std::fmt;

use crate::types::{CellKey, Direction, WordKey};

/// A puzzle that breaks a structural invariant.
///
/// These are rejected when the puzzle is built and never reach a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    EmptyGrid,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidLetter {
        cell: CellKey,
        ch: char,
    },
    NoPlacements,
    ZeroLength {
        word: WordKey,
    },
    LengthMismatch {
        word: WordKey,
        length: usize,
        letters: usize,
    },
    OutOfBounds {
        word: WordKey,
    },
    LetterMismatch {
        word: WordKey,
        cell: CellKey,
        expected: char,
        found: Option<char>,
    },
    DuplicateWord {
        word: WordKey,
    },
    OverlappingWords {
        cell: CellKey,
        dir: Direction,
    },
    UncoveredLetter {
        cell: CellKey,
    },
}

fn word_label(w: &WordKey) -> String {
    format!("({},{},{})", w.row, w.col, w.dir.as_str())
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::EmptyGrid => write!(f, "grid has no cells"),
            PuzzleError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {} has {} cells, expected {}",
                row, found, expected
            ),
            PuzzleError::InvalidLetter { cell, ch } => write!(
                f,
                "cell ({},{}) holds {:?}, which is not a letter",
                cell.row, cell.col, ch
            ),
            PuzzleError::NoPlacements => write!(f, "puzzle has no word placements"),
            PuzzleError::ZeroLength { word } => {
                write!(f, "word {} has zero length", word_label(word))
            }
            PuzzleError::LengthMismatch {
                word,
                length,
                letters,
            } => write!(
                f,
                "word {} declares length {} but has {} letters",
                word_label(word),
                length,
                letters
            ),
            PuzzleError::OutOfBounds { word } => {
                write!(f, "word {} runs outside the grid", word_label(word))
            }
            PuzzleError::LetterMismatch {
                word,
                cell,
                expected,
                found,
            } => match found {
                Some(found) => write!(
                    f,
                    "word {} expects {:?} at ({},{}) but the grid holds {:?}",
                    word_label(word),
                    expected,
                    cell.row,
                    cell.col,
                    found
                ),
                None => write!(
                    f,
                    "word {} expects {:?} at ({},{}) but the cell is a block",
                    word_label(word),
                    expected,
                    cell.row,
                    cell.col
                ),
            },
            PuzzleError::DuplicateWord { word } => {
                write!(f, "word {} is placed twice", word_label(word))
            }
            PuzzleError::OverlappingWords { cell, dir } => write!(
                f,
                "two {} words cover cell ({},{})",
                dir.as_str(),
                cell.row,
                cell.col
            ),
            PuzzleError::UncoveredLetter { cell } => write!(
                f,
                "letter cell ({},{}) belongs to no word",
                cell.row, cell.col
            ),
        }
    }
}

impl std::error::Error for PuzzleError {}

/// Failure to obtain a playable puzzle from a puzzle source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Transport failure or non-success response from the service.
    Request { message: String },
    /// The response could not be decoded into a grid and placements.
    Malformed { message: String },
    /// The response decoded but violates a puzzle invariant.
    Invalid(PuzzleError),
}

impl LoadError {
    pub fn request(message: impl Into<String>) -> Self {
        LoadError::Request {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        LoadError::Malformed {
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Request { message } => write!(f, "puzzle request failed: {}", message),
            LoadError::Malformed { message } => write!(f, "malformed puzzle: {}", message),
            LoadError::Invalid(e) => write!(f, "invalid puzzle: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PuzzleError> for LoadError {
    fn from(e: PuzzleError) -> Self {
        LoadError::Invalid(e)
    }
}
