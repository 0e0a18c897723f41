// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo setupterm tcgetattr tcsetattr

//! Error types for console input and output.
//!
//! Every failure in this crate is returned as an explicit [`ConsoleError`]. Callers
//! distinguish the kinds that matter for retry decisions with
//! [`ConsoleError::is_timeout()`] and [`ConsoleError::is_no_data()`].
//!
//! | Kind                       | Variant                                  |
//! | :------------------------- | :--------------------------------------- |
//! | Device I/O error           | [`ConsoleError::Io`]                     |
//! | Read returned zero bytes   | [`ConsoleError::NoData`]                 |
//! | Deadline passed            | [`ConsoleError::Timeout`]                |
//! | Push into full FIFO        | [`ConsoleError::FifoOverflow`]           |
//! | Output buffer too small    | [`ConsoleError::InsufficientBuffer`]     |
//! | terminfo setup failed      | [`ConsoleError::TerminalDatabase`]       |
//! | Capability not defined     | [`ConsoleError::MissingCapability`]      |

use miette::Diagnostic;
use std::io;

/// Result type used throughout the crate.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Why the terminal capability database could not be initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermDbErrorKind {
    /// There is no entry for the terminal type (or `TERM` is not set).
    NoSuchTerminal,
    /// None of the terminfo directories exist on this host.
    DatabaseNotFound,
    /// The entry exists but could not be loaded.
    Other(String),
}

impl std::fmt::Display for TermDbErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermDbErrorKind::NoSuchTerminal => write!(f, "no such terminal type"),
            TermDbErrorKind::DatabaseNotFound => write!(f, "terminal database not found"),
            TermDbErrorKind::Other(msg) => write!(f, "{msg}"),
        }
    }
}

/// All the ways console input and output can fail.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConsoleError {
    /// A syscall on the terminal descriptor failed.
    #[error("console I/O failed while trying to {context}")]
    #[diagnostic(
        code(r3bl_console::io),
        help("Make sure the process is attached to a terminal")
    )]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// The raw read returned zero bytes.
    #[error("no data available from the console (end of file)")]
    #[diagnostic(code(r3bl_console::no_data))]
    NoData,

    /// The deadline passed before input was ready.
    #[error("timed out waiting for console input")]
    #[diagnostic(
        code(r3bl_console::timeout),
        help("The caller decides whether to retry")
    )]
    Timeout,

    /// A byte was pushed into a FIFO that is already full.
    #[error("input FIFO overflow (capacity {capacity} bytes)")]
    #[diagnostic(
        code(r3bl_console::fifo_overflow),
        help("Drain the FIFO with peek/pull before pushing more bytes")
    )]
    FifoOverflow { capacity: usize },

    /// A caller supplied buffer can't hold the reconstructed key sequence.
    #[error("buffer too small: {needed} bytes needed, {available} available")]
    #[diagnostic(code(r3bl_console::insufficient_buffer))]
    InsufficientBuffer { needed: usize, available: usize },

    /// The terminfo database could not be set up for this terminal.
    #[error("can't load terminal capabilities for {term:?}: {kind}")]
    #[diagnostic(
        code(r3bl_console::terminal_database),
        help("Check the TERM environment variable and that ncurses-base is installed")
    )]
    TerminalDatabase { kind: TermDbErrorKind, term: String },

    /// The terminal does not define a capability that the operation needs.
    #[error("terminal capability {name:?} is not defined")]
    #[diagnostic(code(r3bl_console::missing_capability))]
    MissingCapability { name: &'static str },
}

impl ConsoleError {
    /// Wrap an [`io::Error`] with a short description of the failed operation.
    #[must_use]
    pub fn io(context: &'static str, source: io::Error) -> Self {
        ConsoleError::Io { context, source }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool { matches!(self, ConsoleError::Timeout) }

    #[must_use]
    pub fn is_no_data(&self) -> bool { matches!(self, ConsoleError::NoData) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_predicates() {
        assert!(ConsoleError::Timeout.is_timeout());
        assert!(!ConsoleError::Timeout.is_no_data());
        assert!(ConsoleError::NoData.is_no_data());
        assert!(!ConsoleError::FifoOverflow { capacity: 4 }.is_timeout());
    }

    #[test]
    fn test_display_messages() {
        let err = ConsoleError::InsufficientBuffer {
            needed: 4,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "buffer too small: 4 bytes needed, 2 available"
        );

        let err = ConsoleError::TerminalDatabase {
            kind: TermDbErrorKind::DatabaseNotFound,
            term: "xterm".into(),
        };
        assert_eq!(
            err.to_string(),
            "can't load terminal capabilities for \"xterm\": terminal database not found"
        );
    }

    #[test]
    fn test_io_keeps_source() {
        let err = ConsoleError::io(
            "read from the terminal",
            io::Error::from(io::ErrorKind::BrokenPipe),
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), io::Error::from(io::ErrorKind::BrokenPipe).to_string());
    }
}
