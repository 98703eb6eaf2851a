//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::CrosswordAction`] for the
//! session and [`ShellCommand`] for the runner; [`LinePrompt`] edits the theme.
//! Mouse clicks are resolved by the view, which knows where cells and clues
//! are drawn.

pub mod map;
pub mod prompt;

pub use tui_crossword_types as types;

pub use map::{handle_key_event, map_shell_key, should_quit, ShellCommand};
pub use prompt::{LinePrompt, PromptOutcome, MAX_PROMPT_LEN};
