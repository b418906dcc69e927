//! Lettered modal menus
//!
//! Options are labelled `(a)`, `(b)`, ... and picked with the matching key.

use crossterm::event::KeyCode;

/// Most options a menu can letter
pub const MAX_OPTIONS: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub header: String,
    pub options: Vec<String>,
}

impl Menu {
    /// Panics with more than 26 options
    pub fn new(header: impl Into<String>, options: Vec<String>) -> Self {
        assert!(
            options.len() <= MAX_OPTIONS,
            "cannot have a menu with more than {MAX_OPTIONS} options (got {})",
            options.len()
        );
        Self {
            header: header.into(),
            options,
        }
    }

    /// Lettered lines for display
    pub fn lines(&self) -> Vec<String> {
        self.options
            .iter()
            .zip('a'..='z')
            .map(|(text, letter)| format!("({letter}) {text}"))
            .collect()
    }

    /// Option picked by a key, if the key letters one
    pub fn index_for_key(&self, code: KeyCode) -> Option<usize> {
        let KeyCode::Char(c) = code else {
            return None;
        };
        let c = c.to_ascii_lowercase();
        if !c.is_ascii_lowercase() {
            return None;
        }
        let index = (c as u8 - b'a') as usize;
        (index < self.options.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(n: usize) -> Menu {
        Menu::new("Pick", (0..n).map(|i| format!("option {i}")).collect())
    }

    #[test]
    fn test_letters_map_to_indices() {
        let m = menu(3);
        assert_eq!(m.index_for_key(KeyCode::Char('a')), Some(0));
        assert_eq!(m.index_for_key(KeyCode::Char('C')), Some(2));
        assert_eq!(m.index_for_key(KeyCode::Char('d')), None);
        assert_eq!(m.index_for_key(KeyCode::Char('1')), None);
        assert_eq!(m.index_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_lines_are_lettered() {
        assert_eq!(menu(2).lines(), vec!["(a) option 0", "(b) option 1"]);
    }

    #[test]
    fn test_full_alphabet_allowed() {
        assert_eq!(menu(26).index_for_key(KeyCode::Char('z')), Some(25));
    }

    #[test]
    #[should_panic(expected = "more than 26 options")]
    fn test_too_many_options_panics() {
        menu(27);
    }
}
