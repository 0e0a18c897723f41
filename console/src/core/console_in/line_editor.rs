// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words reedline

use crate::RecallHistory;
use reedline::{FileBackedHistory, History, HistoryItem, Prompt, PromptEditMode,
               PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal};
use std::{borrow::Cow,
          io::{self, BufRead, IsTerminal, Write}};

/// Acquires one edited line of input while the terminal is in line mode.
///
/// Editing keystrokes and history recall are up to the implementation. `Ok(None)`
/// means the input ended before a line was entered.
pub trait LineEditor {
    /// The returned line does not include the line terminator.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the prompt can't be written or the line can't be read.
    fn read_line(&mut self, prompt: &str, history: &RecallHistory) -> io::Result<Option<String>>;
}

/// [`LineEditor`] backed by [`reedline`]: cursor movement, kill / yank, and Up / Down
/// through the lines in the [`RecallHistory`] it is handed.
///
/// The editor's history is rebuilt from [`RecallHistory`] on every call, so
/// `max_recall` and [`ConsoleIn::reset_recall_buffer()`] take effect on the next line.
///
/// When stdin is not a terminal (eg: piped input) there is nothing to edit, and lines
/// are read as is.
///
/// [`ConsoleIn::reset_recall_buffer()`]: crate::ConsoleIn::reset_recall_buffer
#[derive(Debug, Default)]
pub struct ReedlineLineEditor;

impl ReedlineLineEditor {
    #[must_use]
    pub fn new() -> Self { Self }
}

impl LineEditor for ReedlineLineEditor {
    fn read_line(&mut self, prompt: &str, history: &RecallHistory) -> io::Result<Option<String>> {
        if !io::stdin().is_terminal() {
            return read_piped_line(prompt);
        }

        let mut editor = Reedline::create().with_history(Box::new(seed_history(history)?));
        match editor.read_line(&LinePrompt(prompt))? {
            Signal::Success(line) => Ok(Some(line)),
            // Abandons the line being edited.
            Signal::CtrlC => Ok(Some(String::new())),
            Signal::CtrlD => Ok(None),
        }
    }
}

/// In-memory reedline history holding the entries of `history`, oldest first.
///
/// # Errors
///
/// Returns an error if reedline rejects the history or one of its entries.
pub fn seed_history(history: &RecallHistory) -> io::Result<FileBackedHistory> {
    // One extra slot for the line about to be entered.
    let mut acc = FileBackedHistory::new(history.len() + 1)
        .map_err(|err| io::Error::other(err.to_string()))?;
    for line in history.chronological() {
        acc.save(HistoryItem::from_command_line(line))
            .map_err(|err| io::Error::other(err.to_string()))?;
    }
    Ok(acc)
}

fn read_piped_line(prompt: &str) -> io::Result<Option<String>> {
    if !prompt.is_empty() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
    }

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_terminator(line)))
}

/// Drop a trailing `\n` or `\r\n`.
#[must_use]
pub fn strip_line_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Shows the configured prompt as is, with no mode indicator.
struct LinePrompt<'a>(&'a str);

impl Prompt for LinePrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> { Cow::Borrowed(self.0) }

    fn render_prompt_right(&self) -> Cow<'_, str> { Cow::Borrowed("") }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> { Cow::Borrowed("") }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}reverse-search: {}) ", history_search.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reedline::{SearchDirection, SearchQuery};
    use test_case::test_case;

    fn editor_lines(history: &FileBackedHistory) -> Vec<String> {
        history
            .search(SearchQuery::everything(SearchDirection::Forward, None))
            .unwrap()
            .into_iter()
            .map(|it| it.command_line)
            .collect()
    }

    #[test_case("abc\n", "abc")]
    #[test_case("abc\r\n", "abc")]
    #[test_case("abc", "abc")]
    #[test_case("\n", "")]
    #[test_case("a\rb", "a\rb")]
    fn test_strip_line_terminator(input: &str, expected: &str) {
        assert_eq!(strip_line_terminator(input.to_string()), expected);
    }

    #[test]
    fn test_recorded_lines_reach_editor_history() {
        let mut recall = RecallHistory::new(2);
        recall.record("ls");
        recall.record("cd /tmp");
        recall.record("pwd");

        let seeded = seed_history(&recall).unwrap();

        assert_eq!(editor_lines(&seeded), vec!["cd /tmp", "pwd"]);
    }

    #[test]
    fn test_cleared_recall_seeds_empty_history() {
        let mut recall = RecallHistory::new(0);
        recall.record("ls");
        recall.clear();

        let seeded = seed_history(&recall).unwrap();

        assert_eq!(seeded.count_all().unwrap(), 0);
    }

    #[test]
    fn test_prompt_renders_as_configured() {
        let prompt = LinePrompt("> ");
        assert_eq!(prompt.render_prompt_left(), "> ");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
    }
}
