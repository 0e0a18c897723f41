// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo

use crate::{CapabilitySource, ConsoleError, ConsoleResult, TerminfoCapabilities,
            strip_padding};
use std::io::{self, Write};

/// Console output: text, plus the screen operations that need terminal capabilities.
#[derive(Debug)]
pub struct ConsoleOut<W, C> {
    writer: W,
    capabilities: C,
}

impl ConsoleOut<io::Stdout, TerminfoCapabilities> {
    /// Write to stdout, using the terminfo entry named by `TERM`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::TerminalDatabase`] if the entry can't be loaded.
    pub fn open_stdout() -> ConsoleResult<Self> {
        Self::new(io::stdout(), TerminfoCapabilities::from_env())
    }
}

impl<W: Write, C: CapabilitySource> ConsoleOut<W, C> {
    /// # Errors
    ///
    /// Returns the error from [`CapabilitySource::ensure_loaded()`].
    pub fn new(writer: W, mut capabilities: C) -> ConsoleResult<Self> {
        capabilities.ensure_loaded()?;
        Ok(Self {
            writer,
            capabilities,
        })
    }

    #[must_use]
    pub fn writer(&self) -> &W { &self.writer }

    #[must_use]
    pub fn into_writer(self) -> W { self.writer }

    /// Write `text` and flush. Returns the number of chars written.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the write fails.
    pub fn write_str(&mut self, text: &str) -> ConsoleResult<usize> {
        self.write_bytes(text.as_bytes())?;
        Ok(text.chars().count())
    }

    /// Write `text` followed by a line feed.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the write fails.
    pub fn write_line(&mut self, text: &str) -> ConsoleResult<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush())
            .map_err(|err| ConsoleError::io("write to the terminal", err))
    }

    /// Write one char, UTF-8 encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the write fails.
    pub fn put_char(&mut self, ch: char) -> ConsoleResult<()> {
        let mut buffer = [0_u8; 4];
        self.write_bytes(ch.encode_utf8(&mut buffer).as_bytes())
    }

    /// Clear the screen with the terminal's `clear` capability.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::MissingCapability`] if the terminal has no `clear`.
    /// - [`ConsoleError::Io`] if the write fails.
    pub fn clear_screen(&mut self) -> ConsoleResult<()> { self.write_capability("clear") }

    /// Write the string capability `name` (eg: `"smkx"`), without its padding.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::MissingCapability`] if the terminal doesn't define `name`.
    /// - [`ConsoleError::Io`] if the write fails.
    pub fn write_capability(&mut self, name: &'static str) -> ConsoleResult<()> {
        let sequence = self
            .capabilities
            .string(name)
            .map(strip_padding)
            .ok_or(ConsoleError::MissingCapability { name })?;
        self.write_bytes(&sequence)
    }

    /// Put the screen back into a known state. Same as [`clear_screen()`].
    ///
    /// # Errors
    ///
    /// See [`clear_screen()`].
    ///
    /// [`clear_screen()`]: Self::clear_screen
    pub fn reset(&mut self) -> ConsoleResult<()> { self.clear_screen() }

    /// Number of lines on the screen, from the terminal's `lines` capability.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::MissingCapability`] if the terminal doesn't define a
    /// usable `lines` value.
    pub fn query_vertical_lines(&self) -> ConsoleResult<u32> {
        self.capabilities
            .number("lines")
            .and_then(|it| u32::try_from(it).ok())
            .ok_or(ConsoleError::MissingCapability { name: "lines" })
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> ConsoleResult<()> {
        self.writer
            .write_all(bytes)
            .and_then(|()| self.writer.flush())
            .map_err(|err| ConsoleError::io("write to the terminal", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CapabilityTable;
    use pretty_assertions::assert_eq;

    fn vt100_out() -> ConsoleOut<Vec<u8>, CapabilityTable> {
        ConsoleOut::new(Vec::new(), CapabilityTable::vt100()).unwrap()
    }

    #[test]
    fn test_write_str_counts_chars() {
        let mut out = vt100_out();
        assert_eq!(out.write_str("héllo").unwrap(), 5);
        assert_eq!(out.writer().as_slice(), "héllo".as_bytes());
    }

    #[test]
    fn test_put_char_and_write_line() {
        let mut out = vt100_out();
        out.put_char('é').unwrap();
        out.put_char('!').unwrap();
        out.write_line(" ok").unwrap();
        assert_eq!(String::from_utf8(out.into_writer()).unwrap(), "é! ok\n");
    }

    #[test]
    fn test_clear_screen_strips_padding() {
        let table = CapabilityTable::new().with_string("clear", b"\x1b[H\x1b[J$<50>");
        let mut out = ConsoleOut::new(Vec::new(), table).unwrap();
        out.clear_screen().unwrap();
        out.reset().unwrap();
        assert_eq!(out.writer().as_slice(), b"\x1b[H\x1b[J\x1b[H\x1b[J");
    }

    #[test]
    fn test_clear_screen_without_capability() {
        let mut out = ConsoleOut::new(Vec::new(), CapabilityTable::new()).unwrap();
        let err = out.clear_screen().unwrap_err();
        assert!(matches!(err, ConsoleError::MissingCapability { name: "clear" }));
        assert!(out.writer().is_empty());
    }

    #[test]
    fn test_write_capability() {
        let table = CapabilityTable::new().with_string("smkx", b"\x1b[?1h\x1b=");
        let mut out = ConsoleOut::new(Vec::new(), table).unwrap();
        out.write_capability("smkx").unwrap();
        assert!(matches!(
            out.write_capability("rmkx"),
            Err(ConsoleError::MissingCapability { name: "rmkx" })
        ));
        assert_eq!(out.writer().as_slice(), b"\x1b[?1h\x1b=");
    }

    #[test]
    fn test_query_vertical_lines() {
        assert_eq!(vt100_out().query_vertical_lines().unwrap(), 24);

        let out = ConsoleOut::new(Vec::new(), CapabilityTable::new()).unwrap();
        assert!(matches!(
            out.query_vertical_lines(),
            Err(ConsoleError::MissingCapability { name: "lines" })
        ));

        let table = CapabilityTable::new().with_number("lines", -1);
        let out = ConsoleOut::new(Vec::new(), table).unwrap();
        assert!(out.query_vertical_lines().is_err());
    }

    #[test]
    fn test_unknown_terminal_fails_to_open() {
        let result = ConsoleOut::new(
            Vec::new(),
            TerminfoCapabilities::for_terminal("r3bl-no-such-terminal-type-exists"),
        );
        assert!(matches!(result, Err(ConsoleError::TerminalDatabase { .. })));
    }
}
