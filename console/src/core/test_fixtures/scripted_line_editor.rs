// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{LineEditor, RecallHistory};
use std::{collections::VecDeque, io};

/// [`LineEditor`] that replays canned results and remembers how it was called. Once
/// the script runs out it reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedLineEditor {
    script: VecDeque<io::Result<Option<String>>>,
    prompts: Vec<String>,
    history_lengths: Vec<usize>,
}

impl ScriptedLineEditor {
    #[must_use]
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            script: lines.into_iter().map(|it| Ok(Some(it.into()))).collect(),
            ..Self::default()
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.script.push_back(Ok(Some(line.into())));
    }

    pub fn push_eof(&mut self) { self.script.push_back(Ok(None)); }

    pub fn push_error(&mut self, kind: io::ErrorKind) {
        self.script.push_back(Err(io::Error::from(kind)));
    }

    /// Every prompt passed in, in call order.
    #[must_use]
    pub fn prompts(&self) -> &[String] { &self.prompts }

    /// Length of the recall history at each call.
    #[must_use]
    pub fn history_lengths(&self) -> &[usize] { &self.history_lengths }
}

impl LineEditor for ScriptedLineEditor {
    fn read_line(&mut self, prompt: &str, history: &RecallHistory) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        self.history_lengths.push(history.len());
        self.script.pop_front().unwrap_or(Ok(None))
    }
}
