//! Submitted-command history with cursor navigation.

use std::collections::VecDeque;

/// Previously submitted lines, most recent first, capped at `limit`.
///
/// The cursor is `None` while the user edits live input. Navigating away from
/// live input does not keep what was typed; returning to it yields an empty
/// buffer.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    limit: usize,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
            cursor: None,
        }
    }

    /// Record a submitted line and reset navigation.
    pub fn push(&mut self, line: impl Into<String>) {
        self.cursor = None;
        if self.limit == 0 {
            return;
        }
        self.entries.push_front(line.into());
        self.entries.truncate(self.limit);
    }

    /// Step to an older entry, stopping at the oldest.
    ///
    /// Returns `None` when there is no history at all.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(i) => (i + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step to a newer entry. `None` means back at live input.
    pub fn next(&mut self) -> Option<&str> {
        self.cursor = match self.cursor {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
        self.cursor.and_then(|i| self.entries.get(i)).map(String::as_str)
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_two_entries() {
        let mut h = CommandHistory::new(10);
        h.push("a");
        h.push("b");
        assert_eq!(h.previous(), Some("b"));
        assert_eq!(h.previous(), Some("a"));
        assert_eq!(h.previous(), Some("a"));
        assert_eq!(h.next(), Some("b"));
        assert_eq!(h.next(), None);
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn previous_on_empty_is_noop() {
        let mut h = CommandHistory::new(10);
        assert_eq!(h.previous(), None);
        assert_eq!(h.cursor(), None);
        assert_eq!(h.next(), None);
    }

    #[test]
    fn bounded_by_limit() {
        let mut h = CommandHistory::new(3);
        for i in 0..5 {
            h.push(i.to_string());
        }
        assert_eq!(h.iter().collect::<Vec<_>>(), vec!["4", "3", "2"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut h = CommandHistory::new(10);
        h.push("help");
        h.push("help");
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn push_resets_cursor() {
        let mut h = CommandHistory::new(10);
        h.push("a");
        h.previous();
        h.push("b");
        assert_eq!(h.cursor(), None);
        assert_eq!(h.previous(), Some("b"));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut h = CommandHistory::new(0);
        h.push("a");
        assert!(h.is_empty());
    }
}
