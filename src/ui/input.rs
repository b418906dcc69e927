//! Key bindings for the map screen

use crossterm::event::{KeyCode, KeyEvent};

/// A command read from the keyboard while exploring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { dx: i32, dy: i32 },
    Wait,
    PickUp,
    Inventory,
    Drop,
    Descend,
    Character,
    Quit,
}

/// Translate a key press. Unbound keys give `None`.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    let step = |dx, dy| Some(Command::Move { dx, dy });
    match key.code {
        // Arrows and vi keys
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('8') => step(0, -1),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('2') => step(0, 1),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('4') => step(-1, 0),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('6') => step(1, 0),
        KeyCode::Home | KeyCode::Char('y') | KeyCode::Char('7') => step(-1, -1),
        KeyCode::PageUp | KeyCode::Char('u') | KeyCode::Char('9') => step(1, -1),
        KeyCode::End | KeyCode::Char('b') | KeyCode::Char('1') => step(-1, 1),
        KeyCode::PageDown | KeyCode::Char('n') | KeyCode::Char('3') => step(1, 1),

        KeyCode::Char('.') | KeyCode::Char(' ') | KeyCode::Char('5') => Some(Command::Wait),
        KeyCode::Char('g') | KeyCode::Char(',') => Some(Command::PickUp),
        KeyCode::Char('i') => Some(Command::Inventory),
        KeyCode::Char('d') => Some(Command::Drop),
        KeyCode::Char('<') | KeyCode::Char('>') => Some(Command::Descend),
        KeyCode::Char('c') => Some(Command::Character),
        KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_aliases_agree() {
        for code in [KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('8')] {
            assert_eq!(command_for(key(code)), Some(Command::Move { dx: 0, dy: -1 }));
        }
        assert_eq!(command_for(key(KeyCode::Char('n'))), Some(Command::Move { dx: 1, dy: 1 }));
    }

    #[test]
    fn test_both_stairs_keys_descend() {
        assert_eq!(command_for(key(KeyCode::Char('<'))), Some(Command::Descend));
        assert_eq!(command_for(key(KeyCode::Char('>'))), Some(Command::Descend));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(command_for(key(KeyCode::Char('z'))), None);
        assert_eq!(command_for(key(KeyCode::F(5))), None);
    }
}
