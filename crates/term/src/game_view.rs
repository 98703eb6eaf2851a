//! GameView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). The same [`Layout`] drives drawing and mouse
//! hit testing, so a click always lands on what was drawn under it.

use crate::core::{Placement, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{format_elapsed, CellKey, CrosswordAction, Direction, WordKey};

/// Terminal columns per grid cell: two for the clue number, one for the
/// letter, one gap.
pub const CELL_W: u16 = 4;

const PANEL_GAP: u16 = 2;
const MIN_PANEL_W: u16 = 16;
/// Panel width at which the clue lists sit side by side.
const TWO_COLUMN_PANEL_W: u16 = 48;

const BLOCK: CellStyle = CellStyle::plain(Rgb::new(60, 60, 70), Rgb::new(25, 25, 32));
const BLANK: CellStyle = CellStyle::plain(Rgb::new(30, 30, 30), Rgb::new(235, 232, 220));
const WORD_BG: Rgb = Rgb::new(185, 215, 250);
const CURSOR_BG: Rgb = Rgb::new(250, 215, 110);
const CORRECT_FG: Rgb = Rgb::new(25, 120, 45);
const WRONG_FG: Rgb = Rgb::new(200, 35, 35);
const REVEALED_FG: Rgb = Rgb::new(120, 60, 190);
const NUMBER_FG: Rgb = Rgb::new(110, 110, 110);
const BORDER: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const NOTICE: CellStyle = CellStyle::plain(Rgb::new(255, 200, 90), Rgb::new(0, 0, 0)).bold();
const PROMPT_CURSOR: CellStyle = CellStyle::plain(Rgb::new(0, 0, 0), Rgb::new(250, 215, 110));
const ERROR: CellStyle = CellStyle::plain(Rgb::new(255, 110, 110), Rgb::new(0, 0, 0)).bold();

const HELP: &str =
    "Tab: direction  Ctrl+R: reveal word  Ctrl+A: reveal all  Ctrl+N: new  Ctrl+S: size  Ctrl+T: theme  Esc: quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Shell state shown next to the puzzle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusView<'a> {
    pub loading: bool,
    /// Last load error, if any.
    pub error: Option<&'a str>,
    /// Label of the size preset the next puzzle will use.
    pub preset: &'a str,
    /// Theme sent with the next request; empty means any.
    pub theme: &'a str,
    /// Cursor position while the theme is being edited.
    pub theme_cursor: Option<usize>,
}

/// One clue line in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueRow {
    pub word: WordKey,
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

/// Screen positions of everything clickable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the grid frame.
    pub frame_x: u16,
    pub frame_y: u16,
    pub rows: usize,
    pub cols: usize,
    /// Left edge of the side panel, if it fits.
    pub panel_x: Option<u16>,
    pub clue_rows: Vec<ClueRow>,
}

impl Layout {
    fn frame_w(&self) -> u16 {
        frame_span(self.cols, CELL_W)
    }

    fn frame_h(&self) -> u16 {
        frame_span(self.rows, 1)
    }

    /// Screen position of the first column of `cell`.
    pub fn cell_origin(&self, cell: CellKey) -> (u16, u16) {
        (
            (self.frame_x + 1).saturating_add(clamp_u16(cell.col).saturating_mul(CELL_W)),
            (self.frame_y + 1).saturating_add(clamp_u16(cell.row)),
        )
    }

    /// Grid cell under screen position `(x, y)`.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellKey> {
        let gx = x.checked_sub(self.frame_x + 1)?;
        let gy = y.checked_sub(self.frame_y + 1)?;
        let (row, col) = (gy as usize, (gx / CELL_W) as usize);
        (row < self.rows && col < self.cols).then(|| CellKey::new(row, col))
    }

    pub fn clue_at(&self, x: u16, y: u16) -> Option<WordKey> {
        self.clue_rows
            .iter()
            .find(|r| r.y == y && x >= r.x && x < r.x + r.width)
            .map(|r| r.word)
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Width or height of the grid frame: `n` cells of `scale` columns plus borders.
fn frame_span(n: usize, scale: u16) -> u16 {
    clamp_u16(n).saturating_mul(scale).saturating_add(2)
}

/// Terminal renderer for a crossword session.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    /// Where the grid and clues of `snap` go in `viewport`.
    pub fn layout(&self, snap: &SessionSnapshot, viewport: Viewport) -> Layout {
        let rows = snap.puzzle.rows();
        let cols = snap.puzzle.cols();
        let frame_w = frame_span(cols, CELL_W);

        let frame_x = 1;
        let frame_y = 1;

        let panel_x = frame_w.saturating_add(frame_x + PANEL_GAP);
        let panel_w = viewport.width.saturating_sub(panel_x);
        let panel_x = (panel_w >= MIN_PANEL_W).then_some(panel_x);

        let mut clue_rows = Vec::new();
        if let Some(px) = panel_x {
            let top = frame_y + PANEL_HEADER_ROWS;
            let bottom = viewport.height.saturating_sub(1);
            if panel_w >= TWO_COLUMN_PANEL_W {
                let col_w = (panel_w - PANEL_GAP) / 2;
                push_clue_column(snap, Direction::Across, px, top + 1, col_w, bottom, &mut clue_rows);
                push_clue_column(
                    snap,
                    Direction::Down,
                    px + col_w + PANEL_GAP,
                    top + 1,
                    col_w,
                    bottom,
                    &mut clue_rows,
                );
            } else {
                let across = clamp_u16(snap.puzzle.clues(Direction::Across).len());
                push_clue_column(snap, Direction::Across, px, top + 1, panel_w, bottom, &mut clue_rows);
                push_clue_column(
                    snap,
                    Direction::Down,
                    px,
                    top.saturating_add(across).saturating_add(3),
                    panel_w,
                    bottom,
                    &mut clue_rows,
                );
            }
        }

        Layout {
            frame_x,
            frame_y,
            rows,
            cols,
            panel_x,
            clue_rows,
        }
    }

    /// Render into an existing framebuffer.
    pub fn render_into(
        &self,
        snap: Option<&SessionSnapshot>,
        status: &StatusView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        match snap {
            Some(snap) => {
                let layout = self.layout(snap, viewport);
                self.draw_grid(fb, snap, &layout);
                if let Some(px) = layout.panel_x {
                    self.draw_panel(fb, snap, status, &layout, px, viewport);
                }
            }
            None => self.draw_idle(fb, status, viewport),
        }

        if viewport.height > 0 {
            let dim = CellStyle { dim: true, ..VALUE };
            fb.put_str_max(1, viewport.height - 1, HELP, viewport.width.saturating_sub(2), dim);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: Option<&SessionSnapshot>,
        status: &StatusView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
        fb
    }

    /// The action a mouse click at `(x, y)` stands for.
    pub fn hit_test(
        &self,
        snap: &SessionSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<CrosswordAction> {
        let layout = self.layout(snap, viewport);
        if let Some(cell) = layout.cell_at(x, y) {
            return Some(CrosswordAction::ClickCell {
                row: cell.row,
                col: cell.col,
            });
        }
        layout.clue_at(x, y).map(|w| CrosswordAction::ClickClue {
            row: w.row,
            col: w.col,
            dir: w.dir,
        })
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, layout: &Layout) {
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.frame_w(),
            layout.frame_h(),
            BORDER,
        );

        for (r, row) in snap.grid().iter().enumerate() {
            for (c, solution) in row.iter().enumerate() {
                let cell = CellKey::new(r, c);
                let (x, y) = layout.cell_origin(cell);
                if solution.is_none() {
                    fb.fill_rect(x, y, CELL_W, 1, '░', BLOCK);
                    continue;
                }

                let bg = if snap.selected_cell == Some(cell) {
                    CURSOR_BG
                } else if snap.in_selected_word(cell) {
                    WORD_BG
                } else {
                    BLANK.bg
                };
                let base = BLANK.on(bg);
                fb.fill_rect(x, y, CELL_W, 1, ' ', base);

                if let Some(n) = snap.puzzle.number_at(cell) {
                    let number = CellStyle {
                        fg: NUMBER_FG,
                        ..base
                    };
                    fb.put_str_max(x, y, &n.to_string(), 2, number);
                }

                if let Some(&letter) = snap.inputs.get(&cell) {
                    let fg = if snap.is_revealed(cell) {
                        REVEALED_FG
                    } else {
                        match snap.cell_correctness(cell) {
                            Some(false) => WRONG_FG,
                            _ => CORRECT_FG,
                        }
                    };
                    fb.put_char(x.saturating_add(2), y, letter, CellStyle { fg, ..base }.bold());
                }
            }
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        status: &StatusView<'_>,
        layout: &Layout,
        px: u16,
        viewport: Viewport,
    ) {
        let w = viewport.width.saturating_sub(px);
        let mut y = layout.frame_y;

        let end = fb.put_str(px, y, "SCORE ", LABEL);
        let end = fb.put_str(end, y, &snap.score.to_string(), VALUE);
        let end = fb.put_str(end + 2, y, "TIME ", LABEL);
        fb.put_str(end, y, &format_elapsed(snap.elapsed_seconds), VALUE);
        y += 1;

        let end = fb.put_str(px, y, "NEXT ", LABEL);
        fb.put_str_max(end, y, status.preset, w.saturating_sub(5), VALUE);
        y += 1;

        let end = fb.put_str(px, y, "THEME ", LABEL);
        draw_theme(fb, end, y, w.saturating_sub(6), status);
        y += 1;

        if status.loading {
            fb.put_str_max(px, y, "Loading new puzzle...", w, NOTICE);
        } else if let Some(err) = status.error {
            fb.put_str_max(px, y, err, w, ERROR);
        } else if snap.finished {
            let msg = format!(
                "Finished! {} / {} in {}",
                snap.score,
                snap.max_score(),
                format_elapsed(snap.elapsed_seconds)
            );
            fb.put_str_max(px, y, &msg, w, NOTICE);
        }
        y += 2;

        fb.put_str(px, y, "CLUE", LABEL);
        y += 1;
        let clue = snap.current_clue().unwrap_or_else(|| "-".to_string());
        fb.put_str_max(px, y, &clue, w, VALUE);

        let selected = snap.selected_word().map(Placement::key);
        for (dir, heading) in [(Direction::Across, "ACROSS"), (Direction::Down, "DOWN")] {
            let first = layout.clue_rows.iter().find(|r| r.word.dir == dir);
            if let Some(row) = first {
                fb.put_str(row.x, row.y.saturating_sub(1), heading, LABEL);
            }
        }
        for row in &layout.clue_rows {
            let Some(placement) = snap.placements().iter().find(|p| p.key() == row.word) else {
                continue;
            };
            let text = format!(
                "{}. {}",
                snap.puzzle.number_at(placement.start()).unwrap_or(0),
                placement.clue
            );
            let mut style = VALUE;
            if snap.is_word_complete(row.word) {
                style = style.dim();
            }
            if selected == Some(row.word) {
                style = style.bold().underline();
            }
            fb.put_str_max(row.x, row.y, &text, row.width, style);
        }
    }

    fn draw_idle(&self, fb: &mut FrameBuffer, status: &StatusView<'_>, viewport: Viewport) {
        let (text, style) = if status.loading {
            ("Loading new puzzle...", NOTICE)
        } else if let Some(err) = status.error {
            (err, ERROR)
        } else {
            ("Press Ctrl+N for a new puzzle", VALUE)
        };
        let mid_y = viewport.height / 2;
        let text_w = text.chars().count() as u16;
        let x = viewport.width.saturating_sub(text_w) / 2;
        fb.put_str_max(x, mid_y, text, viewport.width, style);

        let preset = format!("Size: {}", status.preset);
        let x = viewport.width.saturating_sub(preset.chars().count() as u16) / 2;
        let end = fb.put_str(x, mid_y.saturating_add(1), "Size: ", LABEL);
        fb.put_str(end, mid_y.saturating_add(1), status.preset, VALUE);

        let y = mid_y.saturating_add(2);
        let end = fb.put_str(x, y, "Theme: ", LABEL);
        draw_theme(fb, end, y, viewport.width.saturating_sub(end), status);
    }
}

/// Rows above the clue lists: score/time, preset, theme, status, gap, clue
/// label, clue text, gap.
const PANEL_HEADER_ROWS: u16 = 8;

/// Theme value, or the prompt with its cursor while editing.
fn draw_theme(fb: &mut FrameBuffer, x: u16, y: u16, max: u16, status: &StatusView<'_>) {
    let Some(cursor) = status.theme_cursor else {
        let theme = if status.theme.is_empty() { "any" } else { status.theme };
        fb.put_str_max(x, y, theme, max, VALUE);
        return;
    };
    fb.put_str_max(x, y, status.theme, max, VALUE.bold());
    let cursor = clamp_u16(cursor);
    if cursor < max {
        let under = status.theme.chars().nth(cursor as usize).unwrap_or(' ');
        fb.put_char(x.saturating_add(cursor), y, under, PROMPT_CURSOR);
    }
}

fn push_clue_column(
    snap: &SessionSnapshot,
    dir: Direction,
    x: u16,
    first_y: u16,
    width: u16,
    bottom: u16,
    out: &mut Vec<ClueRow>,
) {
    for (i, placement) in snap.puzzle.clues(dir).into_iter().enumerate() {
        let y = first_y.saturating_add(clamp_u16(i));
        if y >= bottom {
            break;
        }
        out.push(ClueRow {
            word: placement.key(),
            x,
            y,
            width,
        });
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
    fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
    fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
    fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
}
