// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo

use crate::{ANSI_ESC, CapabilitySource, CapabilityTrie, ConsoleError, ConsoleInConfig,
            ConsoleKey, ConsoleResult, InputDevice, KeyCode, LineEditor, ModeController,
            ReadDeadline, RecallHistory, ReedlineLineEditor, TermFifo, TerminalAttributes,
            TerminalMode, TerminfoCapabilities, TrieStep, Tty, build_capability_trie,
            wait_for_input};
use std::time::{Duration, Instant};

/// A console input handle: reads single keys in raw mode and edited lines in line mode.
///
/// The handle starts in [`TerminalMode::Line`]. [`read_char()`] switches to
/// [`TerminalMode::Raw`] and [`read_line()`] switches back, so callers never manage the
/// mode themselves (although [`set_mode()`] is available).
///
/// The key trie and the input FIFO are built on the first switch to raw mode and live
/// as long as the handle. Closing or dropping the handle restores the terminal
/// attributes that were in effect before raw mode was first entered.
///
/// A handle assumes it is the only thing changing the terminal's mode; it is not meant
/// to be shared between threads.
///
/// [`read_char()`]: Self::read_char
/// [`read_line()`]: Self::read_line
/// [`set_mode()`]: Self::set_mode
#[derive(Debug)]
pub struct ConsoleIn<T, C, L>
where
    T: TerminalAttributes,
{
    terminal: T,
    capabilities: C,
    line_editor: L,
    config: ConsoleInConfig,
    mode: ModeController<T::Snapshot>,
    raw_input: Option<RawInput>,
    history: RecallHistory,
}

/// State that only exists once raw mode has been entered.
#[derive(Debug)]
struct RawInput {
    trie: CapabilityTrie,
    fifo: TermFifo,
    /// When the first byte of the partial sequence sitting in the FIFO was matched.
    /// Survives a timed out read so the escape sequence budget isn't restarted.
    sequence_started: Option<Instant>,
}

enum Fetch {
    Pushed,
    /// The sequence budget ran out on an earlier call: stop matching.
    Abandoned,
}

impl ConsoleIn<Tty, TerminfoCapabilities, ReedlineLineEditor> {
    /// Console input on the controlling terminal, with key sequences from the terminfo
    /// entry named by `TERM` and lines edited with [`ReedlineLineEditor`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if there is no terminal to open.
    pub fn open_stdin(config: ConsoleInConfig) -> ConsoleResult<Self> {
        Ok(Self::new(
            Tty::open()?,
            TerminfoCapabilities::from_env(),
            ReedlineLineEditor::new(),
            config,
        ))
    }
}

impl<T, C, L> ConsoleIn<T, C, L>
where
    T: TerminalAttributes,
{
    #[must_use]
    pub fn mode(&self) -> TerminalMode { self.mode.mode() }

    #[must_use]
    pub fn config(&self) -> &ConsoleInConfig { &self.config }

    #[must_use]
    pub fn terminal(&self) -> &T { &self.terminal }

    pub fn terminal_mut(&mut self) -> &mut T { &mut self.terminal }

    #[must_use]
    pub fn history(&self) -> &RecallHistory { &self.history }

    /// The key trie, once raw mode has been entered.
    #[must_use]
    pub fn capability_trie(&self) -> Option<&CapabilityTrie> {
        self.raw_input.as_ref().map(|it| &it.trie)
    }

    /// Raw bytes read from the terminal that no key has consumed yet.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.raw_input.as_ref().map_or(0, |it| it.fifo.len())
    }

    /// Forget every line recorded for recall.
    pub fn reset_recall_buffer(&mut self) { self.history.clear(); }

    /// Restore the saved terminal attributes if the handle is in raw mode. Also runs on
    /// drop, where a failure is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the attributes can't be restored.
    pub fn close(&mut self) -> ConsoleResult<()> {
        if self.mode.mode() == TerminalMode::Raw {
            self.mode.transition(&mut self.terminal, TerminalMode::Line)?;
        }
        Ok(())
    }
}

impl<T, C, L> ConsoleIn<T, C, L>
where
    T: InputDevice + TerminalAttributes,
    C: CapabilitySource,
    L: LineEditor,
{
    pub fn new(terminal: T, capabilities: C, line_editor: L, config: ConsoleInConfig) -> Self {
        Self {
            history: RecallHistory::new(config.max_recall),
            terminal,
            capabilities,
            line_editor,
            config,
            mode: ModeController::new(),
            raw_input: None,
        }
    }

    /// Switch the terminal to `target`.
    ///
    /// The first switch to [`TerminalMode::Raw`] captures the current attributes,
    /// loads the terminal capabilities, and builds the key trie and input FIFO, in that
    /// order, before applying single character mode.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::Io`] if the attributes can't be read or applied.
    /// - [`ConsoleError::TerminalDatabase`] if the capabilities can't be loaded.
    ///
    /// The mode is unchanged on failure, and so are any buffered bytes.
    pub fn set_mode(&mut self, target: TerminalMode) -> ConsoleResult<()> {
        if target == TerminalMode::Raw && self.mode.mode() != TerminalMode::Raw {
            self.mode.capture(&self.terminal)?;
            prepare_raw_input(&mut self.raw_input, &mut self.capabilities, &self.config)?;
        }
        self.mode.transition(&mut self.terminal, target)
    }

    /// Read one key in raw mode.
    ///
    /// `deadline` bounds the wait for the first byte when nothing is buffered (see
    /// [`ReadDeadline`]). Once a byte starts a known sequence, the rest of it is waited
    /// for until the earlier of `deadline` and
    /// [`escape_sequence_timeout`](ConsoleInConfig::escape_sequence_timeout) after
    /// that first byte.
    ///
    /// A recognized sequence yields its [`KeyCode`], with `ch` set to the final byte. A
    /// byte that starts no sequence yields [`KeyCode::Char`] (or [`KeyCode::Escape`] for
    /// `ESC`).
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::Timeout`] if the deadline or the sequence budget passed first.
    ///   Bytes of an incomplete sequence stay buffered and are matched again, together
    ///   with anything new, on the next call. If that next call finds the sequence
    ///   budget already spent, the sequence is given up and its first byte is reported
    ///   on its own (this is how a lone `ESC` key comes back as [`KeyCode::Escape`]).
    /// - [`ConsoleError::NoData`] if the terminal reached end of file.
    /// - [`ConsoleError::FifoOverflow`] if a sequence outgrows the FIFO.
    /// - Any error from [`set_mode()`](Self::set_mode).
    pub fn read_char(&mut self, deadline: ReadDeadline) -> ConsoleResult<ConsoleKey> {
        self.set_mode(TerminalMode::Raw)?;
        let raw_input =
            prepare_raw_input(&mut self.raw_input, &mut self.capabilities, &self.config)?;
        raw_input.read_key(
            &mut self.terminal,
            deadline,
            self.config.escape_sequence_timeout,
        )
    }

    /// Read one edited line in line mode.
    ///
    /// The returned text holds at most `capacity` chars. If the line is shorter than
    /// that, a `'\n'` is appended. End of input reads as an empty line. Non empty lines
    /// are recorded in the recall history.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::Io`] if the mode switch or the line editor fails.
    pub fn read_line(&mut self, capacity: usize) -> ConsoleResult<String> {
        self.set_mode(TerminalMode::Line)?;

        let line = self
            .line_editor
            .read_line(&self.config.prompt, &self.history)
            .map_err(|err| ConsoleError::io("read a line from the terminal", err))?
            .unwrap_or_default();
        self.history.record(&line);

        let mut text: String = line.chars().take(capacity).collect();
        if text.chars().count() < capacity {
            text.push('\n');
        }
        tracing::trace!(chars = text.chars().count(), "read line");
        Ok(text)
    }
}

impl<T, C, L> Drop for ConsoleIn<T, C, L>
where
    T: TerminalAttributes,
{
    fn drop(&mut self) {
        // We don't care about the result of this operation.
        self.close().ok();
    }
}

fn prepare_raw_input<'a>(
    slot: &'a mut Option<RawInput>,
    capabilities: &mut impl CapabilitySource,
    config: &ConsoleInConfig,
) -> ConsoleResult<&'a mut RawInput> {
    if slot.is_none() {
        capabilities.ensure_loaded()?;
    }
    Ok(slot.get_or_insert_with(|| RawInput {
        trie: build_capability_trie(&*capabilities),
        fifo: TermFifo::new(config.fifo_capacity),
        sequence_started: None,
    }))
}

impl RawInput {
    fn read_key(
        &mut self,
        device: &mut impl InputDevice,
        deadline: ReadDeadline,
        escape_timeout: Duration,
    ) -> ConsoleResult<ConsoleKey> {
        let mut chain = self.trie.root();
        let mut depth = 0_usize;

        loop {
            let Some(byte) = self.fifo.peek() else {
                match self.fetch(device, deadline, escape_timeout, depth) {
                    Ok(Fetch::Pushed) => continue,
                    Ok(Fetch::Abandoned) => break,
                    Err(err) => {
                        self.fifo.reset_peek();
                        return Err(err);
                    }
                }
            };
            depth += 1;

            match self.trie.step(chain, byte) {
                TrieStep::NoMatch => break,
                TrieStep::Complete(code) => {
                    self.fifo.clear_peeked();
                    self.sequence_started = None;
                    let key = ConsoleKey::from_byte(code, byte);
                    tracing::trace!(%key, len = depth, "decoded key sequence");
                    return Ok(key);
                }
                TrieStep::Partial(next) => {
                    self.sequence_started.get_or_insert_with(Instant::now);
                    chain = next;
                }
            }
        }

        self.take_unmatched()
    }

    /// Get one more byte into the FIFO. `depth` is how many bytes of the current
    /// sequence have been matched so far.
    fn fetch(
        &mut self,
        device: &mut impl InputDevice,
        deadline: ReadDeadline,
        escape_timeout: Duration,
        depth: usize,
    ) -> ConsoleResult<Fetch> {
        if depth == 0 {
            match deadline {
                ReadDeadline::Immediate => return Err(ConsoleError::Timeout),
                ReadDeadline::At(instant) => {
                    if !wait_for_input(device, instant) {
                        return Err(ConsoleError::Timeout);
                    }
                }
                ReadDeadline::Forever => {}
            }
        } else {
            let started = *self.sequence_started.get_or_insert_with(Instant::now);
            let budget_end = started + escape_timeout;
            if Instant::now() >= budget_end {
                tracing::debug!(depth, "escape sequence budget spent, giving up the match");
                return Ok(Fetch::Abandoned);
            }
            if !wait_for_input(device, deadline.capped_at(budget_end)) {
                return Err(ConsoleError::Timeout);
            }
        }

        self.fifo.push_from(device)?;
        Ok(Fetch::Pushed)
    }

    /// Consume the oldest buffered byte on its own.
    fn take_unmatched(&mut self) -> ConsoleResult<ConsoleKey> {
        self.sequence_started = None;
        let byte = self.fifo.pull().ok_or(ConsoleError::NoData)?;
        self.fifo.reset_peek();

        let code = if byte == ANSI_ESC {
            KeyCode::Escape
        } else {
            KeyCode::Char
        };
        let key = ConsoleKey::from_byte(code, byte);
        tracing::trace!(%key, "decoded unmatched byte");
        Ok(key)
    }
}
