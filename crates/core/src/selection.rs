//! Selection state machine: the selected cell and the direction it faces.
//!
//! Every transition returns `true` when it changed the selection and `false`
//! when the event was ignored (block cell, nothing selected, grid edge).

use crate::puzzle::{Placement, Puzzle};
use crate::types::{Arrow, CellKey, Direction};

/// Current selection. Starts with no cell and facing across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    cell: Option<CellKey>,
    direction: Direction,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self) -> Option<CellKey> {
        self.cell
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The word the selection refers to.
    pub fn current_word<'p>(&self, puzzle: &'p Puzzle) -> Option<&'p Placement> {
        puzzle.selected_word(self.cell?, self.direction)
    }

    /// Click on a grid cell.
    pub fn click(&mut self, puzzle: &Puzzle, cell: CellKey) -> bool {
        if !puzzle.is_letter(cell) {
            return false;
        }

        let words = puzzle.words_at(cell);

        if self.cell == Some(cell) {
            if words.is_intersection() {
                self.direction = self.direction.toggle();
                return true;
            }
            return false;
        }

        self.cell = Some(cell);
        self.direction = match (words.across, words.down) {
            (Some(_), None) => Direction::Across,
            (None, Some(_)) => Direction::Down,
            // Both exist, so the current direction always resolves here.
            (Some(_), Some(_)) => self.direction,
            (None, None) => self.direction,
        };
        true
    }

    /// Click on a clue list entry: jump to its start and face its direction.
    pub fn select_clue(&mut self, puzzle: &Puzzle, cell: CellKey, dir: Direction) -> bool {
        if !puzzle.is_letter(cell) {
            return false;
        }
        self.cell = Some(cell);
        self.direction = dir;
        true
    }

    /// Tab: flip direction regardless of what words exist at the cell.
    pub fn toggle_direction(&mut self) -> bool {
        if self.cell.is_none() {
            return false;
        }
        self.direction = self.direction.toggle();
        true
    }

    /// Arrow keys: one step, clamped to the grid, only onto letter cells.
    pub fn move_by(&mut self, puzzle: &Puzzle, arrow: Arrow) -> bool {
        let Some(cell) = self.cell else {
            return false;
        };

        let last_row = puzzle.rows().saturating_sub(1);
        let last_col = puzzle.cols().saturating_sub(1);
        let target = match arrow {
            Arrow::Up => CellKey::new(cell.row.saturating_sub(1), cell.col),
            Arrow::Down => CellKey::new((cell.row + 1).min(last_row), cell.col),
            Arrow::Left => CellKey::new(cell.row, cell.col.saturating_sub(1)),
            Arrow::Right => CellKey::new(cell.row, (cell.col + 1).min(last_col)),
        };

        if target == cell || !puzzle.is_letter(target) {
            return false;
        }
        self.cell = Some(target);
        true
    }

    /// Step after a letter was entered at the selected cell.
    ///
    /// Moves to the next cell of the current word; at the end of the word,
    /// turns onto a crossing word at the same cell if there is one.
    pub fn advance(&mut self, puzzle: &Puzzle) -> bool {
        let Some(cell) = self.cell else {
            return false;
        };

        if let Some(word) = puzzle.word_in(cell, self.direction) {
            if let Some(offset) = word.offset_of(cell) {
                if offset + 1 < word.length {
                    self.cell = Some(cell.step(self.direction, 1));
                    return true;
                }
            }
        }

        if puzzle.word_in(cell, self.direction.toggle()).is_some() {
            self.direction = self.direction.toggle();
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // C A T
    // . . A
    // . . N
    fn cat_tan() -> Puzzle {
        Puzzle::from_ascii_rows(
            &["CAT", "..A", "..N"],
            vec![
                Placement::new(0, 0, Direction::Across, "CAT", "feline"),
                Placement::new(0, 2, Direction::Down, "TAN", "color"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_initial_selection() {
        let s = Selection::new();
        assert_eq!(s.cell(), None);
        assert_eq!(s.direction(), Direction::Across);
    }

    #[test]
    fn test_click_block_is_ignored() {
        let p = cat_tan();
        let mut s = Selection::new();
        assert!(!s.click(&p, CellKey::new(1, 0)));
        assert!(!s.click(&p, CellKey::new(5, 5)));
        assert_eq!(s.cell(), None);
    }

    #[test]
    fn test_click_picks_only_available_direction() {
        let p = cat_tan();
        let mut s = Selection::new();
        assert!(s.click(&p, CellKey::new(2, 2)));
        assert_eq!(s.direction(), Direction::Down);

        assert!(s.click(&p, CellKey::new(0, 1)));
        assert_eq!(s.direction(), Direction::Across);
    }

    #[test]
    fn test_click_intersection_keeps_current_direction() {
        let p = cat_tan();
        let mut s = Selection::new();
        s.click(&p, CellKey::new(1, 2));
        assert_eq!(s.direction(), Direction::Down);

        s.click(&p, CellKey::new(0, 2));
        assert_eq!(s.direction(), Direction::Down);
    }

    #[test]
    fn test_click_same_cell_toggles_only_at_intersection() {
        let p = cat_tan();
        let mut s = Selection::new();
        s.click(&p, CellKey::new(0, 2));
        assert!(s.click(&p, CellKey::new(0, 2)));
        assert_eq!(s.direction(), Direction::Down);
        assert!(s.click(&p, CellKey::new(0, 2)));
        assert_eq!(s.direction(), Direction::Across);

        s.click(&p, CellKey::new(0, 0));
        assert!(!s.click(&p, CellKey::new(0, 0)));
        assert_eq!(s.direction(), Direction::Across);
    }

    #[test]
    fn test_clue_click_sets_direction_directly() {
        let p = cat_tan();
        let mut s = Selection::new();
        assert!(s.select_clue(&p, CellKey::new(0, 2), Direction::Down));
        assert_eq!(s.cell(), Some(CellKey::new(0, 2)));
        assert_eq!(s.direction(), Direction::Down);
        assert!(!s.select_clue(&p, CellKey::new(1, 1), Direction::Down));
    }

    #[test]
    fn test_tab_toggles_unconditionally() {
        let p = cat_tan();
        let mut s = Selection::new();
        assert!(!s.toggle_direction());

        s.click(&p, CellKey::new(0, 0));
        assert!(s.toggle_direction());
        assert_eq!(s.direction(), Direction::Down);
        // No down word here; resolution falls back to the across word.
        assert_eq!(s.current_word(&p).map(|w| w.word.as_str()), Some("CAT"));
    }

    #[test]
    fn test_arrows_skip_blocks_and_clamp() {
        let p = cat_tan();
        let mut s = Selection::new();
        assert!(!s.move_by(&p, Arrow::Right));

        s.click(&p, CellKey::new(0, 0));
        assert!(!s.move_by(&p, Arrow::Up));
        assert!(!s.move_by(&p, Arrow::Left));
        assert!(!s.move_by(&p, Arrow::Down));
        assert_eq!(s.cell(), Some(CellKey::new(0, 0)));

        assert!(s.move_by(&p, Arrow::Right));
        assert!(s.move_by(&p, Arrow::Right));
        assert!(!s.move_by(&p, Arrow::Right));
        assert!(s.move_by(&p, Arrow::Down));
        assert_eq!(s.cell(), Some(CellKey::new(1, 2)));
    }

    #[test]
    fn test_advance_within_word_then_turn() {
        let p = cat_tan();
        let mut s = Selection::new();
        s.click(&p, CellKey::new(0, 1));
        assert!(s.advance(&p));
        assert_eq!(s.cell(), Some(CellKey::new(0, 2)));
        assert_eq!(s.direction(), Direction::Across);

        // End of CAT, but TAN crosses here.
        assert!(s.advance(&p));
        assert_eq!(s.cell(), Some(CellKey::new(0, 2)));
        assert_eq!(s.direction(), Direction::Down);

        assert!(s.advance(&p));
        assert!(s.advance(&p));
        assert_eq!(s.cell(), Some(CellKey::new(2, 2)));
        // End of TAN with nothing crossing.
        assert!(!s.advance(&p));
    }
}
