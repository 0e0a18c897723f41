// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};
use strum_macros::{AsRefStr, EnumCount, EnumIter};

/// Logical identity of a key read from the console.
///
/// Everything except [`KeyCode::Char`] is a special key recognized from a terminal
/// specific byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumCount, EnumIter)]
pub enum KeyCode {
    Backspace,
    BackTab,
    Delete,
    Enter,
    Insert,
    Up,
    Down,
    Left,
    Right,
    /// Page up.
    Previous,
    /// Page down.
    Next,
    Home,
    End,
    Tab,
    Escape,
    /// A plain character, not a special key.
    Char,
}

/// One key event produced by [`ConsoleIn::read_char()`].
///
/// `ch` is the decoded form of the last byte that was consumed. It is only meaningful
/// when `code` is [`KeyCode::Char`]; for a multi-byte special key it holds the final
/// byte of the sequence (eg: `'A'` for `ESC [ A`).
///
/// [`ConsoleIn::read_char()`]: crate::ConsoleIn::read_char
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleKey {
    pub code: KeyCode,
    pub ch: char,
}

impl ConsoleKey {
    /// Decode a single raw byte. ASCII maps to itself and bytes `0x80..=0xFF` map to
    /// `U+0080..=U+00FF`, so the raw byte can always be recovered.
    #[must_use]
    pub fn from_byte(code: KeyCode, byte: u8) -> Self {
        Self {
            code,
            ch: char::from(byte),
        }
    }

    #[must_use]
    pub fn is_char(&self) -> bool { self.code == KeyCode::Char }
}

impl Display for ConsoleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.code {
            KeyCode::Char if self.ch.is_control() => {
                write!(f, "Char({:#04x})", u32::from(self.ch))
            }
            KeyCode::Char => write!(f, "Char({:?})", self.ch),
            other => write!(f, "{}", other.as_ref()),
        }
    }
}
