//! Protocol module - JSON wire types for the puzzle generation service
//!
//! Request (client -> service):
//!
//! ```text
//! {"theme":"space","size":15,"wordCount":22}
//! ```
//!
//! Response (service -> client):
//!
//! ```text
//! {"size":3,
//!  "grid":[["C","A","T"],["","","A"],["","","N"]],
//!  "placements":[{"row":0,"col":0,"dir":"across","length":3,"word":"CAT","clue":"feline"}, ...]}
//! ```
//!
//! Grid strings are `""` for a block or a single letter. Converting a response
//! into a [`Puzzle`] runs the full puzzle validation, so anything that parses
//! here is playable.

use serde::{Deserialize, Serialize};

use crate::core::{LoadError, Placement, Puzzle};
use crate::types::{
    max_words_for_size, Direction, DEFAULT_GRID_SIZE, DEFAULT_WORD_COUNT, MAX_GRID_SIZE,
    MAX_WORD_COUNT, MIN_GRID_SIZE, MIN_WORD_COUNT,
};

// ============== Client -> Service ==============

/// Body of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub theme: String,
    pub size: u32,
    #[serde(rename = "wordCount")]
    pub word_count: u32,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            theme: String::new(),
            size: DEFAULT_GRID_SIZE,
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}

impl GenerateRequest {
    pub fn new(theme: impl Into<String>, size: u32, word_count: u32) -> Self {
        Self {
            theme: theme.into(),
            size,
            word_count,
        }
    }

    /// Clamp size and word count the way the service does.
    ///
    /// ```
    /// use tui_crossword_adapter::GenerateRequest;
    ///
    /// let req = GenerateRequest::new("", 3, 50).normalized();
    /// assert_eq!((req.size, req.word_count), (5, 6));
    /// ```
    pub fn normalized(&self) -> Self {
        let size = self.size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let word_count = self
            .word_count
            .clamp(MIN_WORD_COUNT, MAX_WORD_COUNT)
            .min(max_words_for_size(size));
        Self {
            theme: self.theme.trim().to_string(),
            size,
            word_count,
        }
    }
}

// ============== Service -> Client ==============

/// One placement as sent by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementDto {
    pub row: usize,
    pub col: usize,
    pub dir: String,
    pub length: usize,
    pub word: String,
    #[serde(default)]
    pub clue: String,
}

impl PlacementDto {
    fn into_placement(self) -> Result<Placement, LoadError> {
        let dir = Direction::from_str(&self.dir).ok_or_else(|| {
            LoadError::malformed(format!("unknown direction {:?} for {}", self.dir, self.word))
        })?;
        Ok(Placement {
            row: self.row,
            col: self.col,
            dir,
            length: self.length,
            word: self.word,
            clue: self.clue,
        })
    }
}

/// Generated puzzle as sent by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub grid: Vec<Vec<Option<String>>>,
    pub placements: Vec<PlacementDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl GenerateResponse {
    /// Decode the grid and placements and validate the result.
    pub fn into_puzzle(self) -> Result<Puzzle, LoadError> {
        let max = MAX_GRID_SIZE as usize;
        let widest = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        if self.grid.len() > max || widest > max {
            return Err(LoadError::malformed(format!(
                "grid is {}x{widest}, larger than {max}x{max}",
                self.grid.len()
            )));
        }

        let mut grid = Vec::with_capacity(self.grid.len());
        for (row, cells) in self.grid.into_iter().enumerate() {
            let mut out = Vec::with_capacity(cells.len());
            for (col, cell) in cells.into_iter().enumerate() {
                out.push(decode_cell(row, col, cell.as_deref())?);
            }
            grid.push(out);
        }

        let placements = self
            .placements
            .into_iter()
            .map(PlacementDto::into_placement)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Puzzle::new(grid, placements)?)
    }
}

fn decode_cell(row: usize, col: usize, cell: Option<&str>) -> Result<Option<char>, LoadError> {
    let Some(s) = cell else {
        return Ok(None);
    };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(LoadError::malformed(format!(
            "cell ({row}, {col}) holds {s:?}, expected one letter"
        ))),
    }
}

/// Parse a response body into a validated puzzle.
pub fn parse_response(body: &str) -> Result<Puzzle, LoadError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| LoadError::malformed(format!("invalid puzzle JSON: {e}")))?;
    response.into_puzzle()
}
