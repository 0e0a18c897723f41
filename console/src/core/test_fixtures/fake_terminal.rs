// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios

use crate::{InputDevice, TerminalAttributes};
use std::{cell::Cell, collections::VecDeque, io, time::Duration};

/// The subset of a termios block that the mode switch touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeAttributes {
    pub canonical: bool,
    pub echo: bool,
    pub echo_erase: bool,
    pub echo_kill: bool,
    pub vmin: u8,
    pub vtime: u8,
}

impl Default for FakeAttributes {
    fn default() -> Self {
        Self {
            canonical: true,
            echo: true,
            echo_erase: true,
            echo_kill: true,
            vmin: 0,
            vtime: 0,
        }
    }
}

/// In-memory terminal for tests.
///
/// Input is a queue of bytes: [`poll_readable()`] reports ready (without sleeping)
/// whenever the queue is non empty, and [`read_byte()`] reports end of file once it is
/// drained. Failures can be injected one call at a time.
///
/// [`poll_readable()`]: InputDevice::poll_readable
/// [`read_byte()`]: InputDevice::read_byte
#[derive(Debug, Default)]
pub struct FakeTerminal {
    input: VecDeque<u8>,
    poll_count: usize,
    read_failure: Option<io::ErrorKind>,
    poll_failure: Option<io::ErrorKind>,
    attributes: FakeAttributes,
    get_attribute_calls: Cell<usize>,
    set_attribute_calls: usize,
    fail_get_attributes: Cell<bool>,
    fail_set_attributes: bool,
}

impl FakeTerminal {
    #[must_use]
    pub fn with_input(bytes: &[u8]) -> Self {
        Self {
            input: bytes.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Queue more bytes, as if the user typed them.
    pub fn feed(&mut self, bytes: &[u8]) { self.input.extend(bytes); }

    /// Number of queued bytes nobody has read yet.
    #[must_use]
    pub fn pending_input(&self) -> usize { self.input.len() }

    #[must_use]
    pub fn poll_count(&self) -> usize { self.poll_count }

    pub fn fail_next_read(&mut self, kind: io::ErrorKind) { self.read_failure = Some(kind); }

    pub fn fail_next_poll(&mut self, kind: io::ErrorKind) { self.poll_failure = Some(kind); }

    pub fn fail_next_get_attributes(&mut self) { self.fail_get_attributes.set(true); }

    pub fn fail_next_set_attributes(&mut self) { self.fail_set_attributes = true; }

    #[must_use]
    pub fn current_attributes(&self) -> FakeAttributes { self.attributes }

    #[must_use]
    pub fn get_attribute_calls(&self) -> usize { self.get_attribute_calls.get() }

    #[must_use]
    pub fn set_attribute_calls(&self) -> usize { self.set_attribute_calls }
}

impl InputDevice for FakeTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(kind) = self.read_failure.take() {
            return Err(io::Error::from(kind));
        }
        Ok(self.input.pop_front())
    }

    fn poll_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        if let Some(kind) = self.poll_failure.take() {
            return Err(io::Error::from(kind));
        }
        self.poll_count += 1;
        Ok(!self.input.is_empty())
    }
}

impl TerminalAttributes for FakeTerminal {
    type Snapshot = FakeAttributes;

    fn get_attributes(&self) -> io::Result<FakeAttributes> {
        if self.fail_get_attributes.replace(false) {
            return Err(io::Error::from(io::ErrorKind::NotConnected));
        }
        self.get_attribute_calls.set(self.get_attribute_calls.get() + 1);
        Ok(self.attributes)
    }

    fn set_attributes(&mut self, attributes: &FakeAttributes) -> io::Result<()> {
        if self.fail_set_attributes {
            self.fail_set_attributes = false;
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.set_attribute_calls += 1;
        self.attributes = *attributes;
        Ok(())
    }

    fn single_char_attributes(&self, _saved: &FakeAttributes) -> FakeAttributes {
        FakeAttributes {
            canonical: false,
            echo: false,
            echo_erase: false,
            echo_kill: false,
            vmin: 1,
            vtime: 0,
        }
    }
}
