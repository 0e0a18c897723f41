// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixed capacity circular byte buffer with tentative (peek) and final (pull / commit)
//! consumption. See [`TermFifo`] docs.

use crate::{ConsoleError, ConsoleResult, InputDevice};

/// Circular buffer of raw input bytes that lets the key reader look ahead through a
/// multi-byte sequence and then either commit or roll back.
///
/// # Design
///
/// ```text
///            head                  peek                tail
///             ▼                     ▼                   ▼
/// ┌─────────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────────┐
/// │ (free)  │ 1B  │ 5B  │ 41  │ 61  │ 62  │     │     │ (free)  │
/// └─────────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────────┘
///             ◄──── peeked ─────►◄ unpeeked ►
///             ◄────────────── unread (len) ──►
/// ```
///
/// - Bytes from `head` up to the peek cursor have been *peeked*: inspected for a trie
///   match but still owned by the buffer.
/// - [`clear_peeked()`] commits them (they are discarded), [`reset_peek()`] rewinds the
///   cursor back to `head` so they can be inspected again.
/// - [`pull()`] consumes the oldest byte for real.
///
/// Positions are stored as `head` plus two counts (`len` and `peeked`), so the "empty"
/// and "full" states need no sentinel values and can't be confused with each other.
///
/// The capacity is fixed at construction and never grows. It bounds the length of the
/// longest key sequence that can be recognized.
///
/// [`clear_peeked()`]: Self::clear_peeked
/// [`pull()`]: Self::pull
/// [`reset_peek()`]: Self::reset_peek
#[derive(Debug)]
pub struct TermFifo {
    buffer: Box<[u8]>,
    /// Slot of the oldest unconsumed byte. Meaningless while `len == 0`.
    head: usize,
    /// Number of buffered (unconsumed) bytes.
    len: usize,
    /// Number of buffered bytes that have been peeked, always `<= len`.
    peeked: usize,
}

impl TermFifo {
    /// Create an empty FIFO that holds at most `capacity` bytes. A `capacity` of `0` is
    /// treated as `1`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
            peeked: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize { self.buffer.len() }

    /// Number of buffered bytes, peeked or not.
    #[must_use]
    pub fn len(&self) -> usize { self.len }

    #[must_use]
    pub fn is_full(&self) -> bool { self.len == self.capacity() }

    /// True when there is nothing left to peek: either nothing is buffered, or every
    /// buffered byte has already been peeked. This is the sense the key reader needs to
    /// decide whether it must fetch another byte from the device.
    #[must_use]
    pub fn is_empty(&self) -> bool { !self.has_unpeeked_bytes() }

    /// True if any byte is buffered (pushed but not yet pulled or committed).
    #[must_use]
    pub fn has_unread_bytes(&self) -> bool { self.len > 0 }

    /// True if any buffered byte has not been peeked yet.
    #[must_use]
    pub fn has_unpeeked_bytes(&self) -> bool { self.peeked < self.len }

    /// Append one byte at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::FifoOverflow`] if the buffer is full. The buffered
    /// content is left untouched.
    pub fn push_byte(&mut self, byte: u8) -> ConsoleResult<()> {
        if self.is_full() {
            return Err(ConsoleError::FifoOverflow {
                capacity: self.capacity(),
            });
        }
        let tail = self.wrap(self.head + self.len);
        self.buffer[tail] = byte;
        self.len += 1;
        Ok(())
    }

    /// Blocking read of exactly one byte from `device` into the tail.
    ///
    /// The overflow check happens before the device is touched, so a full buffer never
    /// swallows a byte.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::FifoOverflow`] if the buffer is full.
    /// - [`ConsoleError::NoData`] if the device reports end of file.
    /// - [`ConsoleError::Io`] for any other device failure.
    pub fn push_from(&mut self, device: &mut impl InputDevice) -> ConsoleResult<()> {
        if self.is_full() {
            return Err(ConsoleError::FifoOverflow {
                capacity: self.capacity(),
            });
        }
        match device.read_byte() {
            Ok(Some(byte)) => self.push_byte(byte),
            Ok(None) => Err(ConsoleError::NoData),
            Err(err) => Err(ConsoleError::io("read a byte from the terminal", err)),
        }
    }

    /// Return the byte under the peek cursor and advance the cursor. `head` and the
    /// buffered length are not affected. Returns `None` if every buffered byte has
    /// already been peeked.
    pub fn peek(&mut self) -> Option<u8> {
        if !self.has_unpeeked_bytes() {
            return None;
        }
        let byte = self.buffer[self.wrap(self.head + self.peeked)];
        self.peeked += 1;
        Some(byte)
    }

    /// Consume and return the oldest buffered byte.
    ///
    /// If the peek cursor was sitting on `head` it moves along with it; otherwise it
    /// keeps pointing at the same byte. Pulling the last byte returns the buffer to its
    /// empty state.
    pub fn pull(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let byte = self.buffer[self.head];
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        self.peeked = self.peeked.saturating_sub(1);
        if self.len == 0 {
            self.head = 0;
            self.peeked = 0;
        }
        Some(byte)
    }

    /// Commit every peeked byte as consumed. If everything buffered had been peeked the
    /// whole buffer is reset, otherwise `head` moves up to the peek cursor.
    pub fn clear_peeked(&mut self) {
        if self.peeked == self.len {
            self.clear();
            return;
        }
        self.head = self.wrap(self.head + self.peeked);
        self.len -= self.peeked;
        self.peeked = 0;
    }

    /// Rewind the peek cursor to `head`. No data is discarded.
    pub fn reset_peek(&mut self) { self.peeked = 0; }

    /// Zero the storage and reset to the empty state.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.head = 0;
        self.len = 0;
        self.peeked = 0;
    }

    fn wrap(&self, index: usize) -> usize { index % self.capacity() }
}
