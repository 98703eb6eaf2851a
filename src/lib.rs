//! TUI Crossword (workspace facade crate).
//!
//! Exposes `tui_crossword::{core,adapter,term,input,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_crossword_adapter as adapter;
pub use tui_crossword_core as core;
pub use tui_crossword_input as input;
pub use tui_crossword_term as term;
pub use tui_crossword_types as types;
