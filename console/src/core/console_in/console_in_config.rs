// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_ESCAPE_SEQUENCE_TIMEOUT, DEFAULT_FIFO_CAPACITY};
use std::time::Duration;

/// Knobs for a [`ConsoleIn`] handle.
///
/// ```
/// use r3bl_console::ConsoleInConfig;
/// use std::time::Duration;
///
/// let config = ConsoleInConfig::default()
///     .with_escape_sequence_timeout(Duration::from_millis(50))
///     .with_max_recall(100)
///     .with_prompt("> ");
/// assert_eq!(config.fifo_capacity, 256);
/// assert_eq!(config.max_recall, 100);
/// ```
///
/// [`ConsoleIn`]: crate::ConsoleIn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleInConfig {
    /// Size of the raw input buffer, and so the longest key sequence that can be
    /// recognized. `0` is treated as `1`.
    pub fifo_capacity: usize,
    /// How long to wait for the remaining bytes of a key sequence once its first byte
    /// matched.
    pub escape_sequence_timeout: Duration,
    /// Depth of the line recall history. `0` is unlimited.
    pub max_recall: usize,
    /// Shown by the line editor in line mode.
    pub prompt: String,
}

impl Default for ConsoleInConfig {
    fn default() -> Self {
        Self {
            fifo_capacity: DEFAULT_FIFO_CAPACITY,
            escape_sequence_timeout: DEFAULT_ESCAPE_SEQUENCE_TIMEOUT,
            max_recall: 0,
            prompt: String::new(),
        }
    }
}

impl ConsoleInConfig {
    #[must_use]
    pub fn with_fifo_capacity(mut self, capacity: usize) -> Self {
        self.fifo_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_escape_sequence_timeout(mut self, timeout: Duration) -> Self {
        self.escape_sequence_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_recall(mut self, max_recall: usize) -> Self {
        self.max_recall = max_recall;
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}
