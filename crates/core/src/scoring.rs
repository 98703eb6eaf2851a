//! Scoring module - entry scoring, reveal penalties and completion
//!
//! Rules:
//! - A correct entry adds `CORRECT_LETTER_POINTS`, a wrong one removes
//!   `WRONG_LETTER_PENALTY`.
//! - A reveal removes `REVEAL_PENALTY_PER_CELL` for every cell it exposes that
//!   was blank or wrong.
//! - Scores saturate at zero.
//!
//! Completion is never tracked incrementally: [`recompute_completion`] derives it
//! from the inputs and the solution after every mutation.

use std::collections::HashMap;

use crate::puzzle::{Placement, Puzzle};
use crate::types::{
    CellKey, WordKey, CORRECT_LETTER_POINTS, REVEAL_PENALTY_PER_CELL, WRONG_LETTER_PENALTY,
};

/// Score after a single letter entry.
pub fn score_entry(score: u32, correct: bool) -> u32 {
    if correct {
        score.saturating_add(CORRECT_LETTER_POINTS)
    } else {
        score.saturating_sub(WRONG_LETTER_PENALTY)
    }
}

/// Score after revealing `cells` blank or wrong cells.
pub fn apply_reveal_penalty(score: u32, cells: u32) -> u32 {
    score.saturating_sub(cells.saturating_mul(REVEAL_PENALTY_PER_CELL))
}

/// Whether the entry at `cell` matches the solution.
///
/// `None` when there is no entry or the cell is a block: an empty cell is
/// neither right nor wrong.
pub fn cell_correctness(
    puzzle: &Puzzle,
    inputs: &HashMap<CellKey, char>,
    cell: CellKey,
) -> Option<bool> {
    let solution = puzzle.letter_at(cell)?;
    inputs.get(&cell).map(|&input| input == solution)
}

/// Every cell of `word` holds its solution letter.
pub fn word_complete(puzzle: &Puzzle, inputs: &HashMap<CellKey, char>, word: &Placement) -> bool {
    word.cells()
        .all(|cell| cell_correctness(puzzle, inputs, cell) == Some(true))
}

/// Result of a completion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionUpdate {
    /// Words whose completion flag changed, in placement order.
    pub changed: Vec<WordKey>,
    /// Every word is complete.
    pub all_complete: bool,
}

impl CompletionUpdate {
    /// Words that went from incomplete (or unknown) to complete.
    pub fn newly_completed<'a>(
        &'a self,
        completed: &'a HashMap<WordKey, bool>,
    ) -> impl Iterator<Item = WordKey> + 'a {
        self.changed
            .iter()
            .copied()
            .filter(move |k| completed.get(k).copied().unwrap_or(false))
    }
}

/// Recompute `completed` from scratch, writing only entries that changed.
pub fn recompute_completion(
    puzzle: &Puzzle,
    inputs: &HashMap<CellKey, char>,
    completed: &mut HashMap<WordKey, bool>,
) -> CompletionUpdate {
    let mut update = CompletionUpdate {
        changed: Vec::new(),
        all_complete: true,
    };

    for word in puzzle.placements() {
        let key = word.key();
        let complete = word_complete(puzzle, inputs, word);
        if completed.get(&key) != Some(&complete) {
            completed.insert(key, complete);
            update.changed.push(key);
        }
        update.all_complete &= complete;
    }

    update
}
