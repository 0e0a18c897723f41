// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo tigetstr tigetnum kcuu

//! Where key sequences come from. See [`CapabilitySource`] docs.

use crate::ConsoleResult;
use std::collections::HashMap;

/// A name → value lookup over terminal capabilities (eg: `"kcuu1"` → `ESC O A`).
///
/// [`TerminfoCapabilities`] reads the host terminfo database. [`CapabilityTable`] is an
/// in-memory table, used to describe synthetic terminals in tests and for terminals
/// whose sequences are known ahead of time.
///
/// [`TerminfoCapabilities`]: crate::TerminfoCapabilities
pub trait CapabilitySource {
    /// One-time setup before the first lookup. The default does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing database can't be loaded.
    fn ensure_loaded(&mut self) -> ConsoleResult<()> { Ok(()) }

    /// Raw bytes of a string capability, or `None` if the terminal doesn't define it.
    fn string(&self, name: &str) -> Option<&[u8]>;

    /// Value of a numeric capability, or `None` if the terminal doesn't define it.
    fn number(&self, _name: &str) -> Option<i32> { None }
}

/// In-memory [`CapabilitySource`].
///
/// ```
/// use r3bl_console::{CapabilitySource, CapabilityTable};
///
/// let table = CapabilityTable::new()
///     .with_string("kcuu1", b"\x1b[A")
///     .with_number("lines", 24);
/// assert_eq!(table.string("kcuu1"), Some(&b"\x1b[A"[..]));
/// assert_eq!(table.number("lines"), Some(24));
/// assert_eq!(table.string("kcud1"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityTable {
    strings: HashMap<String, Vec<u8>>,
    numbers: HashMap<String, i32>,
}

impl CapabilityTable {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_string(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.strings.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_number(mut self, name: impl Into<String>, value: i32) -> Self {
        self.numbers.insert(name.into(), value);
        self
    }

    /// Sequences a vt100 compatible terminal sends in normal cursor key mode.
    #[must_use]
    pub fn vt100() -> Self {
        Self::new()
            .with_string("kbs", b"\x7f")
            .with_string("kcbt", b"\x1b[Z")
            .with_string("kdch1", b"\x1b[3~")
            .with_string("kich1", b"\x1b[2~")
            .with_string("kcuu1", b"\x1b[A")
            .with_string("kcud1", b"\x1b[B")
            .with_string("kcub1", b"\x1b[D")
            .with_string("kcuf1", b"\x1b[C")
            .with_string("kprv", b"\x1b[5~")
            .with_string("knxt", b"\x1b[6~")
            .with_string("khome", b"\x1b[H")
            .with_string("kend", b"\x1b[F")
            .with_string("clear", b"\x1b[H\x1b[2J")
            .with_number("lines", 24)
            .with_number("cols", 80)
    }
}

impl CapabilitySource for CapabilityTable {
    fn string(&self, name: &str) -> Option<&[u8]> {
        self.strings.get(name).map(Vec::as_slice)
    }

    fn number(&self, name: &str) -> Option<i32> { self.numbers.get(name).copied() }
}
