//! Snapshot module - what a renderer sees of a session
//!
//! A snapshot is cloned out of the session and never feeds back into it. The
//! puzzle is shared through an `Arc`; everything else is copied.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::puzzle::{Placement, Puzzle};
use crate::scoring::cell_correctness;
use crate::types::{CellKey, Direction, WordKey};

/// Read-only copy of a session for renderers.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub puzzle: Arc<Puzzle>,
    pub session_id: u64,
    pub inputs: HashMap<CellKey, char>,
    pub selected_cell: Option<CellKey>,
    pub selected_direction: Direction,
    pub revealed: HashSet<CellKey>,
    pub completed_words: HashMap<WordKey, bool>,
    pub score: u32,
    pub elapsed_seconds: u32,
    pub finished: bool,
}

impl SessionSnapshot {
    pub fn grid(&self) -> &[Vec<Option<char>>] {
        self.puzzle.grid()
    }

    pub fn placements(&self) -> &[Placement] {
        self.puzzle.placements()
    }

    pub fn cell_numbers(&self) -> &HashMap<CellKey, u32> {
        self.puzzle.cell_numbers()
    }

    pub fn cell_correctness(&self, cell: CellKey) -> Option<bool> {
        cell_correctness(&self.puzzle, &self.inputs, cell)
    }

    pub fn is_revealed(&self, cell: CellKey) -> bool {
        self.revealed.contains(&cell)
    }

    pub fn is_word_complete(&self, key: WordKey) -> bool {
        self.completed_words.get(&key).copied().unwrap_or(false)
    }

    pub fn selected_word(&self) -> Option<&Placement> {
        self.puzzle
            .selected_word(self.selected_cell?, self.selected_direction)
    }

    /// `cell` belongs to the selected word.
    pub fn in_selected_word(&self, cell: CellKey) -> bool {
        self.selected_word().is_some_and(|w| w.covers(cell))
    }

    /// Clues covering the selected cell.
    pub fn current_clue(&self) -> Option<String> {
        let cell = self.selected_cell?;
        let line = self.puzzle.clue_line(cell);
        (!line.is_empty()).then_some(line)
    }

    pub fn max_score(&self) -> u32 {
        self.puzzle.letter_count()
    }

    pub fn playable(&self) -> bool {
        !self.finished
    }
}
