//! Terminal crossword runner (default binary).
//!
//! Owns the session host and the adapter runtime, and drives both from a
//! single frame loop: drain background events, draw, handle one input event.
//! Rendering uses the framebuffer-based view (no widget toolkit).

use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_crossword::adapter::{Adapter, ClientConfig, GenerateRequest};
use tui_crossword::core::SessionHost;
use tui_crossword::input::{
    handle_key_event, map_shell_key, should_quit, LinePrompt, PromptOutcome, ShellCommand,
};
use tui_crossword::term::{FrameBuffer, GameView, StatusView, TerminalRenderer, Viewport};
use tui_crossword::types::{SizePreset, SIZE_PRESETS};

/// Longest wait for input before the next frame.
const FRAME: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    init_tracing(config.log_path.as_deref())?;
    let mut adapter = Adapter::from_config(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut adapter, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `path` when given. The terminal is in raw mode, so nothing is
/// written to stdout/stderr.
fn init_tracing(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    info!("starting tui-crossword");
    Ok(())
}

/// Puzzle settings chosen in the shell.
struct Settings {
    request: GenerateRequest,
    preset: Option<usize>,
    /// Open while the player edits the theme.
    theme_prompt: Option<LinePrompt>,
}

impl Settings {
    fn new(config: &ClientConfig) -> Self {
        let request = config.request();
        let preset = SizePreset::index_of(request.size);
        Self {
            request,
            preset,
            theme_prompt: None,
        }
    }

    fn edit_theme(&mut self) {
        self.theme_prompt = Some(LinePrompt::new(&self.request.theme));
    }

    /// Feed `key` to the theme prompt if it is open. Returns false when the
    /// prompt is closed and the key is not consumed.
    fn prompt_key(&mut self, key: KeyEvent) -> bool {
        let Some(prompt) = self.theme_prompt.as_mut() else {
            return false;
        };
        match prompt.handle_key(key) {
            PromptOutcome::Editing => {}
            PromptOutcome::Submit(theme) => {
                info!(theme = %theme, "theme changed");
                self.request.theme = theme;
                self.theme_prompt = None;
            }
            PromptOutcome::Cancel => self.theme_prompt = None,
        }
        true
    }

    fn next_preset(&mut self) {
        let current = self.preset.unwrap_or(SIZE_PRESETS.len() - 1);
        let (index, preset) = SizePreset::next(current);
        self.preset = Some(index);
        self.request = GenerateRequest::new(self.request.theme.clone(), preset.size, preset.word_count)
            .normalized();
    }

    fn label(&self) -> String {
        match self.preset {
            Some(i) => SIZE_PRESETS[i].label.to_string(),
            None => format!("{0}x{0}", self.request.size),
        }
    }
}

fn start_load(host: &mut SessionHost, adapter: &Adapter, settings: &Settings) {
    if let Some(request_id) = host.begin_load() {
        adapter.request_puzzle(request_id, settings.request.clone());
    }
}

fn run(term: &mut TerminalRenderer, adapter: &mut Adapter, config: &ClientConfig) -> Result<()> {
    let view = GameView::default();
    let mut host = SessionHost::new();
    let mut settings = Settings::new(config);
    let mut fb = FrameBuffer::new(0, 0);

    start_load(&mut host, adapter, &settings);

    loop {
        adapter.drain_into(&mut host);

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let snap = host.snapshot();
        let error = host.last_error().map(|e| e.to_string());
        let label = settings.label();
        let status = StatusView {
            loading: host.is_loading(),
            error: error.as_deref(),
            preset: &label,
            theme: settings
                .theme_prompt
                .as_ref()
                .map_or(settings.request.theme.as_str(), LinePrompt::text),
            theme_cursor: settings.theme_prompt.as_ref().map(LinePrompt::cursor),
        };
        view.render_into(snap.as_ref(), &status, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if !ctrl_c && settings.prompt_key(key) {
                    continue;
                }
                if should_quit(key) {
                    return Ok(());
                }
                match map_shell_key(key) {
                    Some(ShellCommand::NewPuzzle) => start_load(&mut host, adapter, &settings),
                    Some(ShellCommand::NextPreset) => settings.next_preset(),
                    Some(ShellCommand::EditTheme) => settings.edit_theme(),
                    None => {
                        if let Some(action) = handle_key_event(key) {
                            host.apply_action(action);
                        }
                    }
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = snap
                    .as_ref()
                    .and_then(|s| view.hit_test(s, viewport, mouse.column, mouse.row))
                {
                    host.apply_action(action);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
