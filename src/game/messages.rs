//! Message log
//!
//! Bounded ring buffer of colored lines. Long messages are word-wrapped and
//! each wrapped line takes its own slot.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::colors::Rgb;

/// One line of the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    lines: VecDeque<Message>,
    capacity: usize,
    width: usize,
}

impl MessageLog {
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            width: width.max(1),
        }
    }

    /// Append a message, evicting the oldest lines once full
    pub fn push(&mut self, text: impl AsRef<str>, color: Rgb) {
        for line in wrap(text.as_ref(), self.width) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(Message { text: line, color });
        }
    }

    /// Lines oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Greedy word wrap; words longer than `width` are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word.char_indices().nth(width).map_or(word.len(), |(i, _)| i);
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Uppercase the first character
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    #[test]
    fn test_wrap_on_word_boundaries() {
        let lines = wrap("the orc attacks the player for 3 hit points", 16);
        assert_eq!(lines, vec!["the orc attacks", "the player for 3", "hit points"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 16));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_oldest_lines_evicted() {
        let mut log = MessageLog::new(3, 40);
        for i in 0..5 {
            log.push(format!("message {i}"), colors::WHITE);
        }
        let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["message 2", "message 3", "message 4"]);
    }

    #[test]
    fn test_wrapped_lines_share_color() {
        let mut log = MessageLog::new(10, 10);
        log.push("you feel a bit refreshed", colors::LIGHT_VIOLET);
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|m| m.color == colors::LIGHT_VIOLET));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("orc"), "Orc");
        assert_eq!(capitalize(""), "");
    }
}
