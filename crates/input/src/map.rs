//! Key mapping from terminal events to engine keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to an engine key. Unhandled keys return `None`.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Ctrl-C ends the process from any screen.
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key_code(KeyCode::Left), Some(Key::Left));
        assert_eq!(map_key_code(KeyCode::Right), Some(Key::Right));
        assert_eq!(map_key_code(KeyCode::Up), Some(Key::Up));
        assert_eq!(map_key_code(KeyCode::Down), Some(Key::Down));
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(map_key_code(KeyCode::Enter), Some(Key::Enter));
        assert_eq!(map_key_code(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(map_key_code(KeyCode::Backspace), Some(Key::Backspace));
        assert_eq!(map_key_code(KeyCode::Char(' ')), Some(Key::Char(' ')));
        assert_eq!(map_key_code(KeyCode::Char('P')), Some(Key::Char('P')));
        assert_eq!(map_key_code(KeyCode::F(1)), None);
        assert_eq!(map_key_code(KeyCode::Tab), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!is_quit(KeyEvent::from(KeyCode::Esc)));
    }
}
