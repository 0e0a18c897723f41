// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

/// Lines entered in line mode, oldest first, for the line editor to recall.
///
/// Holds at most `max_recall` entries (`0` is unlimited); the oldest entry is dropped
/// to make room. Empty lines are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecallHistory {
    entries: VecDeque<String>,
    max_recall: usize,
}

impl RecallHistory {
    #[must_use]
    pub fn new(max_recall: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_recall,
        }
    }

    #[must_use]
    pub fn max_recall(&self) -> usize { self.max_recall }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn record(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        self.entries.push_back(line.to_string());
        if self.max_recall > 0 {
            while self.entries.len() > self.max_recall {
                self.entries.pop_front();
            }
        }
    }

    /// Most recent entry first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(String::as_str)
    }

    /// Oldest entry first, the order they were recorded in.
    pub fn chronological(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) { self.entries.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skips_empty_lines() {
        let mut history = RecallHistory::new(0);
        history.record("");
        assert!(history.is_empty());
    }

    #[test]
    fn test_bounded_drops_oldest() {
        let mut history = RecallHistory::new(2);
        history.record("one");
        history.record("two");
        history.record("three");
        assert_eq!(history.recent().collect::<Vec<_>>(), vec!["three", "two"]);
        assert_eq!(history.chronological().collect::<Vec<_>>(), vec!["two", "three"]);
    }

    #[test]
    fn test_unlimited() {
        let mut history = RecallHistory::new(0);
        for index in 0..500 {
            history.record(&index.to_string());
        }
        assert_eq!(history.len(), 500);
        assert_eq!(history.recent().next(), Some("499"));

        history.clear();
        assert!(history.is_empty());
    }
}
