//! Terminal "game renderer" module.
//!
//! Renders a crossword session into a plain framebuffer (no widget toolkit)
//! that is then flushed to the terminal through crossterm.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot -> framebuffer, plus mouse hit testing
//! - [`renderer`]: row-diffing terminal writer

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_crossword_core as core;
pub use tui_crossword_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{ClueRow, GameView, Layout, StatusView, Viewport, CELL_W};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
