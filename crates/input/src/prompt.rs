//! One-line text prompt (used for the puzzle theme).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest text the prompt accepts, in characters.
pub const MAX_PROMPT_LEN: usize = 40;

/// Result of feeding one key to a [`LinePrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing; redraw.
    Editing,
    /// Enter was pressed. Carries the trimmed text.
    Submit(String),
    /// Esc was pressed; keep the old value.
    Cancel,
}

/// Editable single-line buffer with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePrompt {
    buffer: String,
    cursor: usize,
}

impl LinePrompt {
    /// Start editing `initial`, with the cursor at the end.
    pub fn new(initial: &str) -> Self {
        let buffer: String = initial.chars().take(MAX_PROMPT_LEN).collect();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_at(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return PromptOutcome::Editing;
        }
        match key.code {
            KeyCode::Enter => return PromptOutcome::Submit(self.buffer.trim().to_string()),
            KeyCode::Esc => return PromptOutcome::Cancel,
            KeyCode::Char(c) if !c.is_control() && self.len() < MAX_PROMPT_LEN => {
                let at = self.byte_at(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.buffer.remove(at);
            }
            KeyCode::Delete if self.cursor < self.len() => {
                let at = self.byte_at(self.cursor);
                self.buffer.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => {}
        }
        PromptOutcome::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(prompt: &mut LinePrompt, code: KeyCode) -> PromptOutcome {
        prompt.handle_key(KeyEvent::from(code))
    }

    fn type_text(prompt: &mut LinePrompt, text: &str) {
        for c in text.chars() {
            assert_eq!(press(prompt, KeyCode::Char(c)), PromptOutcome::Editing);
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut p = LinePrompt::new("");
        type_text(&mut p, "  rivers ");
        assert_eq!(p.text(), "  rivers ");
        assert_eq!(
            press(&mut p, KeyCode::Enter),
            PromptOutcome::Submit("rivers".to_string())
        );
    }

    #[test]
    fn test_editing_at_cursor() {
        let mut p = LinePrompt::new("spce");
        assert_eq!(p.cursor(), 4);
        press(&mut p, KeyCode::Left);
        press(&mut p, KeyCode::Left);
        type_text(&mut p, "a");
        assert_eq!(p.text(), "space");

        press(&mut p, KeyCode::Home);
        press(&mut p, KeyCode::Delete);
        assert_eq!(p.text(), "pace");
        press(&mut p, KeyCode::End);
        press(&mut p, KeyCode::Backspace);
        assert_eq!(p.text(), "pac");
        // Nothing to delete past either end.
        press(&mut p, KeyCode::Delete);
        press(&mut p, KeyCode::Home);
        press(&mut p, KeyCode::Backspace);
        assert_eq!((p.text(), p.cursor()), ("pac", 0));
    }

    #[test]
    fn test_multibyte_text() {
        let mut p = LinePrompt::new("café");
        press(&mut p, KeyCode::Backspace);
        type_text(&mut p, "é!");
        assert_eq!(p.text(), "café!");
        press(&mut p, KeyCode::Left);
        press(&mut p, KeyCode::Backspace);
        assert_eq!(p.text(), "caf!");
    }

    #[test]
    fn test_length_limit() {
        let mut p = LinePrompt::new(&"x".repeat(MAX_PROMPT_LEN + 5));
        assert_eq!(p.text().len(), MAX_PROMPT_LEN);
        press(&mut p, KeyCode::Char('y'));
        assert_eq!(p.text().len(), MAX_PROMPT_LEN);
    }

    #[test]
    fn test_cancel_and_chords() {
        let mut p = LinePrompt::new("ocean");
        assert_eq!(
            p.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            PromptOutcome::Editing
        );
        assert_eq!(p.text(), "ocean");
        assert_eq!(press(&mut p, KeyCode::Esc), PromptOutcome::Cancel);
    }
}
