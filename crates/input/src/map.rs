//! Key mapping from terminal events to puzzle actions.

use crate::types::{Arrow, CrosswordAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands handled by the shell rather than the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Request a fresh puzzle with the current settings.
    NewPuzzle,
    /// Cycle to the next grid size preset.
    NextPreset,
    /// Open the theme prompt.
    EditTheme,
}

/// Map keyboard input to puzzle actions.
///
/// Plain letters are entries; control chords are reserved for commands.
pub fn handle_key_event(key: KeyEvent) -> Option<CrosswordAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'r' => Some(CrosswordAction::RevealWord),
            'a' => Some(CrosswordAction::RevealAll),
            _ => None,
        },
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(CrosswordAction::EnterLetter(c)),

        KeyCode::Tab | KeyCode::BackTab => Some(CrosswordAction::ToggleDirection),

        KeyCode::Up => Some(CrosswordAction::Move(Arrow::Up)),
        KeyCode::Down => Some(CrosswordAction::Move(Arrow::Down)),
        KeyCode::Left => Some(CrosswordAction::Move(Arrow::Left)),
        KeyCode::Right => Some(CrosswordAction::Move(Arrow::Right)),

        _ => None,
    }
}

/// Map keyboard input to shell commands.
pub fn map_shell_key(key: KeyEvent) -> Option<ShellCommand> {
    if key.code == KeyCode::F(5) {
        return Some(ShellCommand::NewPuzzle);
    }
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('N') => Some(ShellCommand::NewPuzzle),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(ShellCommand::NextPreset),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(ShellCommand::EditTheme),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some(CrosswordAction::EnterLetter('a'))
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(CrosswordAction::EnterLetter('Q'))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('7'))), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(CrosswordAction::Move(Arrow::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(CrosswordAction::Move(Arrow::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Tab)),
            Some(CrosswordAction::ToggleDirection)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::BackTab)),
            Some(CrosswordAction::ToggleDirection)
        );
    }

    #[test]
    fn test_reveal_chords() {
        assert_eq!(handle_key_event(ctrl('r')), Some(CrosswordAction::RevealWord));
        assert_eq!(handle_key_event(ctrl('a')), Some(CrosswordAction::RevealAll));
        // Other control chords never become entries.
        assert_eq!(handle_key_event(ctrl('n')), None);
        assert_eq!(handle_key_event(ctrl('c')), None);
    }

    #[test]
    fn test_shell_keys() {
        assert_eq!(map_shell_key(ctrl('n')), Some(ShellCommand::NewPuzzle));
        assert_eq!(map_shell_key(KeyEvent::from(KeyCode::F(5))), Some(ShellCommand::NewPuzzle));
        assert_eq!(map_shell_key(ctrl('s')), Some(ShellCommand::NextPreset));
        assert_eq!(map_shell_key(ctrl('t')), Some(ShellCommand::EditTheme));
        assert_eq!(handle_key_event(ctrl('t')), None);
        assert_eq!(map_shell_key(KeyEvent::from(KeyCode::Char('n'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(ctrl('c')));
        assert!(should_quit(ctrl('q')));
        // Plain q is a letter.
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}
