//! Reveal module - expose solution letters in exchange for points
//!
//! Revealed cells are locked: they hold the solution letter and ignore further
//! entries. Only cells that were not locked already and were blank or wrong
//! count towards the penalty, so revealing an already-correct word is free.

use tracing::info;

use crate::scoring::apply_reveal_penalty;
use crate::session::SessionState;
use crate::types::{CellKey, Direction};

impl SessionState {
    /// Reveal the word at `cell`, preferring `dir`.
    ///
    /// Returns `false` when no word resolves at `cell`.
    pub fn reveal_word(&mut self, cell: CellKey, dir: Direction) -> bool {
        let Some(word) = self.puzzle().selected_word(cell, dir) else {
            return false;
        };
        let cells: Vec<(CellKey, char)> = word.cells().zip(word.word.chars()).collect();
        let key = word.key();

        let newly = self.lock_cells(cells);
        self.set_score(apply_reveal_penalty(self.score(), newly));
        info!(
            row = key.row,
            col = key.col,
            dir = key.dir.as_str(),
            newly_revealed = newly,
            score = self.score(),
            "word revealed"
        );

        self.refresh_completion();
        true
    }

    /// Reveal the word under the current selection.
    pub fn reveal_selected_word(&mut self) -> bool {
        match self.selected_cell() {
            Some(cell) => self.reveal_word(cell, self.selected_direction()),
            None => false,
        }
    }

    /// Reveal every letter cell and end the session.
    pub fn reveal_all(&mut self) -> bool {
        let cells: Vec<(CellKey, char)> = self.puzzle().letter_cells().collect();

        let newly = self.lock_cells(cells);
        self.set_score(apply_reveal_penalty(self.score(), newly));
        info!(newly_revealed = newly, score = self.score(), "puzzle revealed");

        self.finish();
        // Every word now reads as complete.
        self.refresh_completion();
        true
    }

    fn lock_cells(&mut self, cells: Vec<(CellKey, char)>) -> u32 {
        let mut newly = 0;
        for (cell, solution) in cells {
            if self.lock_cell(cell, solution) {
                newly += 1;
            }
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::puzzle::{Placement, Puzzle};
    use crate::types::WordKey;

    fn cat_tan() -> Arc<Puzzle> {
        Arc::new(
            Puzzle::from_ascii_rows(
                &["CAT", "..A", "..N"],
                vec![
                    Placement::new(0, 0, Direction::Across, "CAT", "feline"),
                    Placement::new(0, 2, Direction::Down, "TAN", "color"),
                ],
            )
            .unwrap(),
        )
    }

    fn session_with_score(score: u32) -> SessionState {
        let mut s = SessionState::new(cat_tan(), 1);
        s.set_score(score);
        s
    }

    #[test]
    fn test_reveal_word_charges_blank_and_wrong_cells() {
        let mut s = session_with_score(10);
        s.apply_letter(CellKey::new(0, 0), 'C'); // +1 -> 11
        s.apply_letter(CellKey::new(0, 1), 'O'); // -1 -> 10

        assert!(s.reveal_word(CellKey::new(0, 1), Direction::Across));
        // (0,1) wrong and (0,2) blank.
        assert_eq!(s.score(), 6);
        assert_eq!(s.input_at(CellKey::new(0, 1)), Some('A'));
        assert!(s.is_revealed(CellKey::new(0, 0)));
        assert!(s.is_word_complete(WordKey::new(0, 0, Direction::Across)));
        assert!(!s.finished());
    }

    #[test]
    fn test_reveal_correct_word_is_free() {
        let mut s = SessionState::new(cat_tan(), 1);
        for (i, ch) in "CAT".chars().enumerate() {
            s.apply_letter(CellKey::new(0, i), ch);
        }
        assert_eq!(s.score(), 3);
        assert!(s.reveal_word(CellKey::new(0, 0), Direction::Across));
        assert_eq!(s.score(), 3);
    }

    #[test]
    fn test_reveal_twice_charges_once() {
        let mut s = session_with_score(20);
        s.reveal_word(CellKey::new(1, 2), Direction::Down);
        assert_eq!(s.score(), 14);
        s.reveal_word(CellKey::new(2, 2), Direction::Down);
        assert_eq!(s.score(), 14);
        // The crossing word only pays for its unrevealed cells.
        s.reveal_word(CellKey::new(0, 0), Direction::Across);
        assert_eq!(s.score(), 10);
        assert!(s.finished());
    }

    #[test]
    fn test_revealed_cells_are_locked() {
        let mut s = SessionState::new(cat_tan(), 1);
        s.click_cell(CellKey::new(0, 0));
        assert!(s.reveal_selected_word());
        assert!(!s.apply_letter(CellKey::new(0, 1), 'Z'));
        assert_eq!(s.input_at(CellKey::new(0, 1)), Some('A'));
    }

    #[test]
    fn test_reveal_without_selection_or_word() {
        let mut s = session_with_score(5);
        assert!(!s.reveal_selected_word());
        assert!(!s.reveal_word(CellKey::new(1, 0), Direction::Across));
        assert_eq!(s.score(), 5);
        assert!(s.revealed().is_empty());
    }

    #[test]
    fn test_reveal_all_finishes_and_marks_words() {
        let mut s = session_with_score(3);
        s.apply_letter(CellKey::new(0, 0), 'C'); // 4
        s.tick();

        assert!(s.reveal_all());
        // Four of five cells were blank.
        assert_eq!(s.score(), 0);
        assert!(s.finished());
        assert_eq!(s.revealed().len(), 5);
        assert!(s.completed_words().values().all(|&done| done));
        assert_eq!(s.completed_words().len(), 2);

        assert!(!s.tick());
        assert_eq!(s.elapsed_seconds(), 1);
    }

    #[test]
    fn test_reveal_all_on_solved_puzzle_is_free() {
        let mut s = SessionState::new(cat_tan(), 1);
        for (cell, ch) in [((0, 0), 'C'), ((0, 1), 'A'), ((0, 2), 'T'), ((1, 2), 'A'), ((2, 2), 'N')] {
            s.apply_letter(CellKey::new(cell.0, cell.1), ch);
        }
        assert!(s.finished());
        s.reveal_all();
        assert_eq!(s.score(), 5);
    }
}
