// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios tcgetattr tcsetattr TCSAFLUSH ICANON ECHOE ECHOK ECHOKE VMIN VTIME
// cspell:words isatty EINTR revents

//! Real terminal descriptor: raw reads, readiness polling and termios access, all
//! through rustix's safe APIs.

use crate::{ConsoleError, ConsoleResult, InputDevice, TerminalAttributes};
use rustix::{event::{PollFd, PollFlags, Timespec, poll},
             fd::{AsFd, BorrowedFd},
             io::Errno,
             termios::{self, LocalModes, OptionalActions, SpecialCodeIndex, Termios}};
use std::{fs::File,
          io,
          time::Duration};

/// Represents either stdin, `/dev/tty`, or some other terminal file.
///
/// This enum allows us to handle both cases where stdin is a tty (normal terminal
/// usage) and where stdin is redirected (e.g., piped input), requiring us to use
/// `/dev/tty`.
#[derive(Debug)]
pub enum TerminalFd {
    /// Using standard input (when it's a terminal).
    Stdin(io::Stdin),
    /// Using `/dev/tty` (when stdin is redirected).
    DevTty(File),
    /// Any other terminal, eg: the slave side of a pseudo terminal.
    File(File),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) | TerminalFd::File(file) => file.as_fd(),
        }
    }
}

/// The controlling terminal as an [`InputDevice`] and [`TerminalAttributes`] provider.
#[derive(Debug)]
pub struct Tty {
    fd: TerminalFd,
}

impl Tty {
    /// Open the controlling terminal.
    ///
    /// Uses stdin if it is a tty; otherwise opens `/dev/tty`. This handles cases where
    /// stdin is redirected (e.g., `echo "data" | your_app`).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if stdin is not a tty and `/dev/tty` can't be
    /// opened.
    pub fn open() -> ConsoleResult<Self> {
        let stdin = io::stdin();
        if termios::isatty(&stdin) {
            return Ok(Self {
                fd: TerminalFd::Stdin(stdin),
            });
        }
        let file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .map_err(|err| ConsoleError::io("open /dev/tty", err))?;
        Ok(Self {
            fd: TerminalFd::DevTty(file),
        })
    }

    /// Wrap an already open terminal file.
    #[must_use]
    pub fn from_file(file: File) -> Self {
        Self {
            fd: TerminalFd::File(file),
        }
    }

    #[must_use]
    pub fn fd(&self) -> &TerminalFd { &self.fd }

    #[must_use]
    pub fn is_terminal(&self) -> bool { termios::isatty(&self.fd) }
}

impl InputDevice for Tty {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buffer = [0_u8; 1];
        loop {
            match rustix::io::read(&self.fd, &mut buffer[..]) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buffer[0])),
                // EINTR - retry (signal interrupted syscall).
                Err(Errno::INTR) => {}
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    fn poll_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        let timeout = Timespec {
            tv_sec: i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX),
            tv_nsec: i64::from(timeout.subsec_nanos()),
        };
        let mut fds = [PollFd::new(&self.fd, PollFlags::IN)];
        let ready = poll(&mut fds, Some(&timeout))?;
        Ok(ready > 0)
    }
}

impl TerminalAttributes for Tty {
    type Snapshot = Termios;

    fn get_attributes(&self) -> io::Result<Termios> { Ok(termios::tcgetattr(&self.fd)?) }

    fn set_attributes(&mut self, attributes: &Termios) -> io::Result<()> {
        // Flush (TCSAFLUSH): drop unread input typed under the old discipline.
        Ok(termios::tcsetattr(
            &self.fd,
            OptionalActions::Flush,
            attributes,
        )?)
    }

    fn single_char_attributes(&self, saved: &Termios) -> Termios {
        single_char_mode_attributes(saved)
    }
}

/// Single character mode derived from `saved`: canonical input and all echo flags off,
/// reads return after one byte with no inter-byte timeout. Signal generation and input
/// translation are left as they were.
#[must_use]
pub fn single_char_mode_attributes(saved: &Termios) -> Termios {
    let mut it = saved.clone();
    it.local_modes.remove(
        LocalModes::ICANON
            | LocalModes::ECHO
            | LocalModes::ECHOE
            | LocalModes::ECHOK
            | LocalModes::ECHOKE,
    );
    it.special_codes[SpecialCodeIndex::VMIN] = 1;
    it.special_codes[SpecialCodeIndex::VTIME] = 0;
    it
}
