//! Puzzle module - the immutable grid and its word placements
//!
//! A [`Puzzle`] is validated once at construction and never changes afterwards.
//! Cell numbering is derived from the placement order and cached here, since
//! the placements it depends on are immutable.

use std::collections::{HashMap, HashSet};

use crate::error::PuzzleError;
use crate::types::{CellKey, Direction, WordKey};

/// One word of the puzzle: where it starts, which way it runs, and its clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub dir: Direction,
    pub length: usize,
    pub word: String,
    pub clue: String,
}

impl Placement {
    /// Build a placement whose length is taken from `word`.
    pub fn new(
        row: usize,
        col: usize,
        dir: Direction,
        word: impl Into<String>,
        clue: impl Into<String>,
    ) -> Self {
        let word = word.into();
        Self {
            row,
            col,
            dir,
            length: word.chars().count(),
            word,
            clue: clue.into(),
        }
    }

    pub fn key(&self) -> WordKey {
        WordKey::new(self.row, self.col, self.dir)
    }

    pub fn start(&self) -> CellKey {
        CellKey::new(self.row, self.col)
    }
}

/// Assign clue numbers to placement start cells.
///
/// Placements are scanned in order; each start cell not numbered yet gets the
/// next integer, starting at 1. A cell that starts both an across and a down
/// word keeps the single number it got first.
pub fn number_cells(placements: &[Placement]) -> HashMap<CellKey, u32> {
    let mut numbers = HashMap::with_capacity(placements.len());
    let mut counter = 1;
    for p in placements {
        numbers.entry(p.start()).or_insert_with(|| {
            let n = counter;
            counter += 1;
            n
        });
    }
    numbers
}

/// Complete crossword: solution grid plus placements.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid: Vec<Vec<Option<char>>>,
    placements: Vec<Placement>,
    numbers: HashMap<CellKey, u32>,
    cols: usize,
}

impl Puzzle {
    /// Build and validate a puzzle.
    ///
    /// Grid letters and placement words are normalized to uppercase.
    pub fn new(
        grid: Vec<Vec<Option<char>>>,
        placements: Vec<Placement>,
    ) -> Result<Self, PuzzleError> {
        let grid: Vec<Vec<Option<char>>> = grid
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|c| c.map(|ch| ch.to_ascii_uppercase()))
                    .collect()
            })
            .collect();
        let placements: Vec<Placement> = placements
            .into_iter()
            .map(|p| Placement {
                word: p.word.to_ascii_uppercase(),
                ..p
            })
            .collect();

        let cols = validate_grid(&grid)?;
        validate_placements(&grid, cols, &placements)?;

        let numbers = number_cells(&placements);
        Ok(Self {
            grid,
            placements,
            numbers,
            cols,
        })
    }

    /// Build a puzzle from text rows, where `.` or a space marks a block.
    ///
    /// Handy for fixtures:
    ///
    /// ```
    /// use tui_crossword_core::{Placement, Puzzle};
    /// use tui_crossword_types::{CellKey, Direction};
    ///
    /// let p = Puzzle::from_ascii_rows(
    ///     &["HI"],
    ///     vec![Placement::new(0, 0, Direction::Across, "HI", "greeting")],
    /// )
    /// .unwrap();
    /// assert_eq!(p.letter_at(CellKey::new(0, 1)), Some('I'));
    /// ```
    pub fn from_ascii_rows(rows: &[&str], placements: Vec<Placement>) -> Result<Self, PuzzleError> {
        let grid = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '.' | ' ' => None,
                        _ => Some(ch),
                    })
                    .collect()
            })
            .collect();
        Self::new(grid, placements)
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn grid(&self) -> &[Vec<Option<char>>] {
        &self.grid
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Solution letter at `cell`; `None` for blocks and out-of-range cells.
    pub fn letter_at(&self, cell: CellKey) -> Option<char> {
        self.grid.get(cell.row)?.get(cell.col).copied().flatten()
    }

    pub fn is_letter(&self, cell: CellKey) -> bool {
        self.letter_at(cell).is_some()
    }

    /// All letter cells in row-major order.
    pub fn letter_cells(&self) -> impl Iterator<Item = (CellKey, char)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.map(|ch| (CellKey::new(r, c), ch)))
        })
    }

    /// Number of letter cells, which is also the best attainable score.
    pub fn letter_count(&self) -> u32 {
        self.letter_cells().count() as u32
    }

    pub fn cell_numbers(&self) -> &HashMap<CellKey, u32> {
        &self.numbers
    }

    pub fn number_at(&self, cell: CellKey) -> Option<u32> {
        self.numbers.get(&cell).copied()
    }

    /// Placements of one direction, ordered by clue number.
    pub fn clues(&self, dir: Direction) -> Vec<&Placement> {
        let mut out: Vec<&Placement> = self.placements.iter().filter(|p| p.dir == dir).collect();
        out.sort_by_key(|p| self.number_at(p.start()).unwrap_or(u32::MAX));
        out
    }

    /// Clue label such as "12A".
    pub fn clue_label(&self, placement: &Placement) -> String {
        match self.number_at(placement.start()) {
            Some(n) => format!("{}{}", n, placement.dir.suffix()),
            None => placement.dir.suffix().to_string(),
        }
    }

    /// Every clue covering `cell`, e.g. `"1A: feline | 2D: color"`.
    pub fn clue_line(&self, cell: CellKey) -> String {
        self.placements
            .iter()
            .filter(|p| p.covers(cell))
            .map(|p| format!("{}: {}", self.clue_label(p), p.clue))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

fn validate_grid(grid: &[Vec<Option<char>>]) -> Result<usize, PuzzleError> {
    let cols = grid.first().map(|r| r.len()).unwrap_or(0);
    if cols == 0 {
        return Err(PuzzleError::EmptyGrid);
    }

    for (r, row) in grid.iter().enumerate() {
        if row.len() != cols {
            return Err(PuzzleError::RaggedRow {
                row: r,
                expected: cols,
                found: row.len(),
            });
        }
        for (c, cell) in row.iter().enumerate() {
            if let Some(ch) = *cell {
                if !ch.is_ascii_alphabetic() {
                    return Err(PuzzleError::InvalidLetter {
                        cell: CellKey::new(r, c),
                        ch,
                    });
                }
            }
        }
    }

    Ok(cols)
}

fn validate_placements(
    grid: &[Vec<Option<char>>],
    cols: usize,
    placements: &[Placement],
) -> Result<(), PuzzleError> {
    if placements.is_empty() {
        return Err(PuzzleError::NoPlacements);
    }

    let rows = grid.len();
    let mut keys = HashSet::with_capacity(placements.len());
    let mut covered: HashSet<(CellKey, Direction)> = HashSet::new();

    for p in placements {
        let key = p.key();
        if p.length == 0 {
            return Err(PuzzleError::ZeroLength { word: key });
        }
        let letters = p.word.chars().count();
        if letters != p.length {
            return Err(PuzzleError::LengthMismatch {
                word: key,
                length: p.length,
                letters,
            });
        }
        match p.start().checked_step(p.dir, p.length - 1) {
            Some(end) if end.row < rows && end.col < cols => {}
            _ => return Err(PuzzleError::OutOfBounds { word: key }),
        }
        if !keys.insert(key) {
            return Err(PuzzleError::DuplicateWord { word: key });
        }

        for (cell, expected) in p.cells().zip(p.word.chars()) {
            let found = grid[cell.row][cell.col];
            if found != Some(expected) {
                return Err(PuzzleError::LetterMismatch {
                    word: key,
                    cell,
                    expected,
                    found,
                });
            }
            if !covered.insert((cell, p.dir)) {
                return Err(PuzzleError::OverlappingWords { cell, dir: p.dir });
            }
        }
    }

    for (r, row) in grid.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let key = CellKey::new(r, c);
            if cell.is_some()
                && !covered.contains(&(key, Direction::Across))
                && !covered.contains(&(key, Direction::Down))
            {
                return Err(PuzzleError::UncoveredLetter { cell: key });
            }
        }
    }

    Ok(())
}
