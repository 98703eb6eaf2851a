//! Adapter module - async plumbing around the puzzle engine
//!
//! The engine itself is synchronous and does no I/O. This crate supplies the
//! two things a session needs from the outside world:
//!
//! - **Puzzles**: fetched from the generation service over HTTP, or read from
//!   a saved response on disk (see [`source`])
//! - **Time**: a one-second tick per live session (see [`timer`])
//!
//! Both run on a tokio runtime owned by [`Adapter`], which hands results back
//! to the game loop over a channel.
//!
//! # Service Protocol
//!
//! One JSON request per puzzle, `POST`ed to the configured URL:
//!
//! ```text
//! Client -> Service: {"theme":"rivers","size":15,"wordCount":22}
//! Service -> Client: {"size":15,"grid":[["","R",...],...],"placements":[{"row":0,"col":1,"dir":"down","length":4,"word":"NILE","clue":"..."},...]}
//! ```
//!
//! See [`protocol`] for the wire types and request normalization.
//!
//! # Environment Variables
//!
//! - `CROSSWORD_API_URL`: generation endpoint (default
//!   `http://127.0.0.1:8080/api/new_crossword`)
//! - `CROSSWORD_THEME`: starting theme (Ctrl+T edits it in the game)
//! - `CROSSWORD_SIZE` / `CROSSWORD_WORD_COUNT`: grid size and word count
//!   (default 15 / 22, clamped before sending)
//! - `CROSSWORD_TIMEOUT_SECS`: request timeout (default 60)
//! - `CROSSWORD_PUZZLE_FILE`: play a saved response instead of calling the service
//! - `CROSSWORD_LOG_PATH`: file for tracing output
//!
//! # Testing
//!
//! Point the client at a saved puzzle to play offline:
//!
//! ```bash
//! CROSSWORD_PUZZLE_FILE=puzzle.json cargo run
//! ```

pub mod config;
pub mod protocol;
pub mod runtime;
pub mod source;
pub mod timer;

pub use tui_crossword_core as core;
pub use tui_crossword_types as types;

pub use config::ClientConfig;
pub use protocol::*;
pub use runtime::{Adapter, RuntimeEvent};
pub use source::{FilePuzzleSource, HttpPuzzleSource, PuzzleFuture, PuzzleSource};
pub use timer::SessionTimer;
