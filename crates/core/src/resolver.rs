//! Word resolution: which placements cover a cell, and which one is "current".

use crate::puzzle::{Placement, Puzzle};
use crate::types::{CellKey, Direction};

impl Placement {
    /// Cells of this word in reading order.
    pub fn cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        let start = self.start();
        let dir = self.dir;
        (0..self.length).map(move |i| start.step(dir, i))
    }

    /// Position of `cell` within this word.
    pub fn offset_of(&self, cell: CellKey) -> Option<usize> {
        let offset = match self.dir {
            Direction::Across if cell.row == self.row && cell.col >= self.col => {
                cell.col - self.col
            }
            Direction::Down if cell.col == self.col && cell.row >= self.row => cell.row - self.row,
            _ => return None,
        };
        (offset < self.length).then_some(offset)
    }

    pub fn covers(&self, cell: CellKey) -> bool {
        self.offset_of(cell).is_some()
    }
}

/// The words crossing a cell: at most one per direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordsAt<'a> {
    pub across: Option<&'a Placement>,
    pub down: Option<&'a Placement>,
}

impl<'a> WordsAt<'a> {
    pub fn get(&self, dir: Direction) -> Option<&'a Placement> {
        match dir {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }

    /// Both an across and a down word cross here.
    pub fn is_intersection(&self) -> bool {
        self.across.is_some() && self.down.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.across.is_none() && self.down.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Placement> {
        self.across.into_iter().chain(self.down)
    }
}

impl Puzzle {
    /// Words covering `cell`.
    pub fn words_at(&self, cell: CellKey) -> WordsAt<'_> {
        WordsAt {
            across: self.word_in(cell, Direction::Across),
            down: self.word_in(cell, Direction::Down),
        }
    }

    /// The word of direction `dir` covering `cell`.
    pub fn word_in(&self, cell: CellKey, dir: Direction) -> Option<&Placement> {
        self.placements()
            .iter()
            .find(|p| p.dir == dir && p.covers(cell))
    }

    /// The word a selection at `cell` facing `dir` refers to.
    ///
    /// Prefers `dir`, falls back to the other direction.
    pub fn selected_word(&self, cell: CellKey, dir: Direction) -> Option<&Placement> {
        if !self.is_letter(cell) {
            return None;
        }
        self.word_in(cell, dir)
            .or_else(|| self.word_in(cell, dir.toggle()))
    }
}
