// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios tcgetattr tcsetattr ICANON ECHOE ECHOK ECHOKE VMIN VTIME

//! Two-state terminal mode machine. See [`ModeController`] docs.
//!
//! ```text
//!            transition(Raw)
//!          ┌───────────────────┐
//!          │  capture once,    ▼
//!   ┌──────┴───┐  apply raw ┌─────────┐
//!   │   Line   │            │   Raw   │
//!   └──────────┘◄───────────┴─────────┘
//!               transition(Line)
//!               reapply captured
//! ```

use crate::{ConsoleError, ConsoleResult};
use std::{fmt::Debug, io};

/// Which input discipline the terminal is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// Canonical: the OS buffers and edits input by line, and echoes it.
    #[default]
    Line,
    /// Single character: every byte is delivered immediately, without echo.
    Raw,
}

/// Get / set access to a terminal's attribute block.
pub trait TerminalAttributes {
    /// An opaque copy of the whole attribute block.
    type Snapshot: Clone + Debug;

    /// # Errors
    ///
    /// Returns the OS error if the attributes can't be read.
    fn get_attributes(&self) -> io::Result<Self::Snapshot>;

    /// # Errors
    ///
    /// Returns the OS error if the attributes can't be applied.
    fn set_attributes(&mut self, attributes: &Self::Snapshot) -> io::Result<()>;

    /// Derive single character mode attributes from `saved`.
    fn single_char_attributes(&self, saved: &Self::Snapshot) -> Self::Snapshot;
}

/// Tracks the current [`TerminalMode`] and the attributes to restore when leaving
/// [`TerminalMode::Raw`].
///
/// The attributes are captured once, right before the first switch to raw mode, and
/// are what every later switch back to [`TerminalMode::Line`] reapplies. The recorded
/// mode only changes after the underlying attribute change succeeded.
#[derive(Debug)]
pub struct ModeController<S> {
    mode: TerminalMode,
    saved: Option<S>,
}

impl<S> Default for ModeController<S> {
    fn default() -> Self {
        Self {
            mode: TerminalMode::Line,
            saved: None,
        }
    }
}

impl<S: Clone + Debug> ModeController<S> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn mode(&self) -> TerminalMode { self.mode }

    /// The attributes captured before the first raw mode switch, if any.
    #[must_use]
    pub fn saved(&self) -> Option<&S> { self.saved.as_ref() }

    /// Capture the current attributes if that hasn't happened yet.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the attributes can't be read.
    pub fn capture<A>(&mut self, terminal: &A) -> ConsoleResult<()>
    where
        A: TerminalAttributes<Snapshot = S>,
    {
        if self.saved.is_none() {
            let attributes = terminal
                .get_attributes()
                .map_err(|err| ConsoleError::io("read the terminal attributes", err))?;
            self.saved = Some(attributes);
        }
        Ok(())
    }

    /// Switch `terminal` to `target`. A no-op if it is already there.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the attributes can't be read or applied. The
    /// recorded mode is unchanged in that case.
    pub fn transition<A>(&mut self, terminal: &mut A, target: TerminalMode) -> ConsoleResult<()>
    where
        A: TerminalAttributes<Snapshot = S>,
    {
        if self.mode == target {
            return Ok(());
        }

        match target {
            TerminalMode::Raw => {
                self.capture(terminal)?;
                if let Some(saved) = self.saved.as_ref() {
                    let raw = terminal.single_char_attributes(saved);
                    terminal.set_attributes(&raw).map_err(|err| {
                        ConsoleError::io("switch the terminal to single character mode", err)
                    })?;
                }
            }
            TerminalMode::Line => {
                if let Some(saved) = self.saved.as_ref() {
                    terminal.set_attributes(saved).map_err(|err| {
                        ConsoleError::io("restore the terminal attributes", err)
                    })?;
                }
            }
        }

        tracing::debug!(from = ?self.mode, to = ?target, "terminal mode switched");
        self.mode = target;
        Ok(())
    }
}
