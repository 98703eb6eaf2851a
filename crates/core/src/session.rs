//! Session state module - everything that changes while a puzzle is played
//!
//! One [`SessionState`] exists per loaded puzzle and is replaced wholesale when
//! the next puzzle loads. Events arrive through [`SessionState::apply_action`]
//! (or the individual operations) and are applied atomically. Misdirected
//! events (block cells, locked cells, a finished session) are ignored and
//! reported as `false`, never as errors.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::puzzle::{Placement, Puzzle};
use crate::scoring::{cell_correctness, recompute_completion, score_entry};
use crate::selection::Selection;
use crate::snapshot::SessionSnapshot;
use crate::types::{Arrow, CellKey, CrosswordAction, Direction, WordKey};

/// Mutable state of one puzzle session.
#[derive(Debug, Clone)]
pub struct SessionState {
    puzzle: Arc<Puzzle>,
    /// Id assigned by the host; timer ticks are matched against it.
    session_id: u64,
    inputs: HashMap<CellKey, char>,
    selection: Selection,
    revealed: HashSet<CellKey>,
    completed_words: HashMap<WordKey, bool>,
    score: u32,
    elapsed_seconds: u32,
    finished: bool,
}

impl SessionState {
    /// Fresh session: no entries, no selection, clock at zero.
    pub fn new(puzzle: Arc<Puzzle>, session_id: u64) -> Self {
        Self {
            puzzle,
            session_id,
            inputs: HashMap::new(),
            selection: Selection::new(),
            revealed: HashSet::new(),
            completed_words: HashMap::new(),
            score: 0,
            elapsed_seconds: 0,
            finished: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn inputs(&self) -> &HashMap<CellKey, char> {
        &self.inputs
    }

    pub fn input_at(&self, cell: CellKey) -> Option<char> {
        self.inputs.get(&cell).copied()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_cell(&self) -> Option<CellKey> {
        self.selection.cell()
    }

    pub fn selected_direction(&self) -> Direction {
        self.selection.direction()
    }

    pub fn selected_word(&self) -> Option<&Placement> {
        self.selection.current_word(&self.puzzle)
    }

    pub fn revealed(&self) -> &HashSet<CellKey> {
        &self.revealed
    }

    pub fn is_revealed(&self, cell: CellKey) -> bool {
        self.revealed.contains(&cell)
    }

    pub fn completed_words(&self) -> &HashMap<WordKey, bool> {
        &self.completed_words
    }

    pub fn is_word_complete(&self, key: WordKey) -> bool {
        self.completed_words.get(&key).copied().unwrap_or(false)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Timer should be running: the session is live and unfinished.
    pub fn timer_running(&self) -> bool {
        !self.finished
    }

    /// `Some(true|false)` for a letter cell with an entry, `None` otherwise.
    pub fn cell_correctness(&self, cell: CellKey) -> Option<bool> {
        cell_correctness(&self.puzzle, &self.inputs, cell)
    }

    /// Apply an event. Returns whether the state changed.
    pub fn apply_action(&mut self, action: CrosswordAction) -> bool {
        match action {
            CrosswordAction::ClickCell { row, col } => self.click_cell(CellKey::new(row, col)),
            CrosswordAction::ClickClue { row, col, dir } => {
                self.select_clue(CellKey::new(row, col), dir)
            }
            CrosswordAction::EnterLetter(ch) => self.enter_letter(ch),
            CrosswordAction::ToggleDirection => self.toggle_direction(),
            CrosswordAction::Move(arrow) => self.move_selection(arrow),
            CrosswordAction::RevealWord => self.reveal_selected_word(),
            CrosswordAction::RevealAll => self.reveal_all(),
        }
    }

    /// The state that `action` leads to, leaving `self` untouched.
    pub fn after(&self, action: CrosswordAction) -> Self {
        let mut next = self.clone();
        next.apply_action(action);
        next
    }

    pub fn click_cell(&mut self, cell: CellKey) -> bool {
        if self.finished {
            return false;
        }
        self.selection.click(&self.puzzle, cell)
    }

    pub fn select_clue(&mut self, cell: CellKey, dir: Direction) -> bool {
        if self.finished {
            return false;
        }
        self.selection.select_clue(&self.puzzle, cell, dir)
    }

    pub fn toggle_direction(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.selection.toggle_direction()
    }

    pub fn move_selection(&mut self, arrow: Arrow) -> bool {
        if self.finished {
            return false;
        }
        self.selection.move_by(&self.puzzle, arrow)
    }

    /// Type `ch` into the selected cell.
    pub fn enter_letter(&mut self, ch: char) -> bool {
        match self.selection.cell() {
            Some(cell) => self.apply_letter(cell, ch),
            None => false,
        }
    }

    /// Write `ch` at `cell`, score it, and recompute completion.
    ///
    /// When `cell` is the selected cell the selection advances afterwards.
    pub fn apply_letter(&mut self, cell: CellKey, ch: char) -> bool {
        if self.finished || self.revealed.contains(&cell) || !ch.is_ascii_alphabetic() {
            return false;
        }
        let Some(solution) = self.puzzle.letter_at(cell) else {
            return false;
        };

        let letter = ch.to_ascii_uppercase();
        self.inputs.insert(cell, letter);
        self.score = score_entry(self.score, letter == solution);
        debug!(
            row = cell.row,
            col = cell.col,
            correct = letter == solution,
            score = self.score,
            "letter entered"
        );

        self.refresh_completion();

        if self.selection.cell() == Some(cell) {
            self.selection.advance(&self.puzzle);
        }
        true
    }

    /// One timer second. Stops counting once the session is finished.
    pub fn tick(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            puzzle: Arc::clone(&self.puzzle),
            session_id: self.session_id,
            inputs: self.inputs.clone(),
            selected_cell: self.selection.cell(),
            selected_direction: self.selection.direction(),
            revealed: self.revealed.clone(),
            completed_words: self.completed_words.clone(),
            score: self.score,
            elapsed_seconds: self.elapsed_seconds,
            finished: self.finished,
        }
    }

    /// Recompute word completion; finish the session if every word is done.
    pub(crate) fn refresh_completion(&mut self) {
        let update = recompute_completion(&self.puzzle, &self.inputs, &mut self.completed_words);
        for key in update.newly_completed(&self.completed_words) {
            debug!(row = key.row, col = key.col, dir = key.dir.as_str(), "word completed");
        }
        if update.all_complete {
            self.finish();
        }
    }

    pub(crate) fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        info!(
            session_id = self.session_id,
            score = self.score,
            elapsed_seconds = self.elapsed_seconds,
            "session finished"
        );
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Lock `cell` with its solution letter. Returns whether the cell counts
    /// as newly revealed (not locked before, and blank or wrong).
    pub(crate) fn lock_cell(&mut self, cell: CellKey, solution: char) -> bool {
        let newly = !self.revealed.contains(&cell) && self.inputs.get(&cell) != Some(&solution);
        self.revealed.insert(cell);
        self.inputs.insert(cell, solution);
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_new_session_state() {
        let s = SessionState::new(cat_tan(), 7);
        assert_eq!(s.session_id(), 7);
        assert_eq!(s.score(), 0);
        assert_eq!(s.elapsed_seconds(), 0);
        assert!(!s.finished());
        assert!(s.inputs().is_empty());
        assert!(s.completed_words().is_empty());
        assert_eq!(s.selected_cell(), None);
        assert_eq!(s.selected_direction(), Direction::Across);
    }

    #[test]
    fn test_letter_entry_scores_and_advances() {
        let mut s = SessionState::new(cat_tan(), 1);
        s.click_cell(CellKey::new(0, 0));

        assert!(s.enter_letter('c'));
        assert_eq!(s.input_at(CellKey::new(0, 0)), Some('C'));
        assert_eq!(s.score(), 1);
        assert_eq!(s.selected_cell(), Some(CellKey::new(0, 1)));

        assert!(s.enter_letter('x'));
        assert_eq!(s.score(), 0);
        assert_eq!(s.cell_correctness(CellKey::new(0, 1)), Some(false));

        // Wrong again at zero stays at zero.
        s.click_cell(CellKey::new(0, 1));
        assert!(s.enter_letter('q'));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_invalid_letters_are_ignored() {
        let mut s = SessionState::new(cat_tan(), 1);
        assert!(!s.enter_letter('c'));

        s.click_cell(CellKey::new(0, 0));
        assert!(!s.enter_letter('1'));
        assert!(!s.enter_letter(' '));
        assert!(!s.enter_letter('é'));
        assert!(!s.apply_letter(CellKey::new(1, 0), 'a'));
        assert!(!s.apply_letter(CellKey::new(9, 9), 'a'));
        assert!(s.inputs().is_empty());
        assert_eq!(s.selected_cell(), Some(CellKey::new(0, 0)));
    }

    #[test]
    fn test_apply_letter_elsewhere_keeps_selection() {
        let mut s = SessionState::new(cat_tan(), 1);
        s.click_cell(CellKey::new(0, 0));
        assert!(s.apply_letter(CellKey::new(2, 2), 'n'));
        assert_eq!(s.selected_cell(), Some(CellKey::new(0, 0)));
    }

    #[test]
    fn test_after_leaves_original_untouched() {
        let s = SessionState::new(cat_tan(), 1);
        let next = s.after(CrosswordAction::ClickCell { row: 0, col: 1 });
        assert_eq!(s.selected_cell(), None);
        assert_eq!(next.selected_cell(), Some(CellKey::new(0, 1)));
    }

    #[test]
    fn test_finishing_freezes_interaction_and_clock() {
        let mut s = SessionState::new(cat_tan(), 1);
        assert!(s.tick());
        assert!(s.tick());

        for (cell, ch) in [((0, 0), 'C'), ((0, 1), 'A'), ((0, 2), 'T'), ((1, 2), 'A'), ((2, 2), 'N')] {
            s.apply_letter(CellKey::new(cell.0, cell.1), ch);
        }
        assert!(s.finished());
        assert!(!s.timer_running());
        assert_eq!(s.score(), 5);

        assert!(!s.tick());
        assert_eq!(s.elapsed_seconds(), 2);
        assert!(!s.apply_letter(CellKey::new(0, 0), 'Z'));
        assert!(!s.click_cell(CellKey::new(0, 1)));
        assert!(!s.toggle_direction());
        assert!(!s.move_selection(Arrow::Right));
        assert_eq!(s.input_at(CellKey::new(0, 0)), Some('C'));
    }

    #[test]
    fn test_completion_flag_tracks_edits() {
        let mut s = SessionState::new(cat_tan(), 1);
        let cat = WordKey::new(0, 0, Direction::Across);
        s.apply_letter(CellKey::new(0, 0), 'C');
        s.apply_letter(CellKey::new(0, 1), 'A');
        s.apply_letter(CellKey::new(0, 2), 'T');
        assert!(s.is_word_complete(cat));

        s.apply_letter(CellKey::new(0, 1), 'U');
        assert!(!s.is_word_complete(cat));
        assert_eq!(s.completed_words().get(&cat), Some(&false));
    }
}
