// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Default log file, relative to the current directory.
pub const DEFAULT_LOG_FILE: &str = "r3bl_console.log";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also allows you to set the log level. Use
/// [`TracingConfig::install_global()`] or [`TracingConfig::install_thread_local()`] to
/// put it into effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// Where log lines go. The `String` is the log file path, eg: `/tmp/conin_probe.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl Default for TracingConfig {
    /// Debug level, to [`DEFAULT_LOG_FILE`].
    fn default() -> Self { Self::new_file(None) }
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    /// Logging is off if the level is [`LevelFilter::OFF`] or there is nowhere to write.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.level_filter == LevelFilter::OFF || self.writer_config == WriterConfig::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_logs_to_file() {
        let config = TracingConfig::default();
        assert_eq!(
            config.get_writer_config(),
            WriterConfig::File(DEFAULT_LOG_FILE.to_string())
        );
        assert_eq!(config.get_level_filter(), LevelFilter::DEBUG);
        assert!(!config.is_disabled());
    }

    #[test]
    fn test_disabled() {
        let off = TracingConfig::new_display(DisplayPreference::Stderr)
            .with_level_filter(LevelFilter::OFF);
        assert!(off.is_disabled());

        let nowhere = TracingConfig {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::TRACE,
        };
        assert!(nowhere.is_disabled());
    }
}
