// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words EINTR

//! Byte source abstraction and the blocking wait-with-deadline helper.

use std::{io,
          time::{Duration, Instant}};

/// A source of raw input bytes that can be waited on.
///
/// [`Tty`] implements this for a real terminal descriptor. [`FakeTerminal`] implements
/// it for tests.
///
/// [`FakeTerminal`]: crate::FakeTerminal
/// [`Tty`]: crate::Tty
pub trait InputDevice {
    /// Blocking read of exactly one byte. `Ok(None)` means end of file.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the read fails.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Block for at most `timeout` until a read would not block. Returns `Ok(false)` on
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the wait itself fails.
    fn poll_readable(&mut self, timeout: Duration) -> io::Result<bool>;
}

/// Block until `device` has input ready or `deadline` passes, whichever comes first.
///
/// Returns `false` right away if the deadline has already passed, so a deadline of
/// "now" just means "don't wait". A failed wait is logged and reported as `false`
/// (not ready in time), the same as a timeout.
pub fn wait_for_input(device: &mut impl InputDevice, deadline: Instant) -> bool {
    let now = Instant::now();
    let Some(remaining) = deadline
        .checked_duration_since(now)
        .filter(|it| !it.is_zero())
    else {
        return false;
    };

    match device.poll_readable(remaining) {
        Ok(ready) => ready,
        Err(err) => {
            // EINTR - a signal interrupted the wait, not an error.
            if err.kind() != io::ErrorKind::Interrupted {
                tracing::warn!(%err, "waiting for console input failed");
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FakeTerminal;

    #[test]
    fn test_past_deadline_does_not_poll() {
        let mut device = FakeTerminal::with_input(b"a");
        assert!(!wait_for_input(&mut device, Instant::now()));
        assert_eq!(device.poll_count(), 0);
    }

    #[test]
    fn test_ready_device() {
        let mut device = FakeTerminal::with_input(b"a");
        let deadline = Instant::now() + Duration::from_secs(5);
        assert!(wait_for_input(&mut device, deadline));
        assert_eq!(device.poll_count(), 1);
    }

    #[test]
    fn test_idle_device_times_out() {
        let mut device = FakeTerminal::with_input(b"");
        let deadline = Instant::now() + Duration::from_secs(5);
        assert!(!wait_for_input(&mut device, deadline));
    }

    #[test]
    fn test_poll_error_reports_not_ready() {
        let mut device = FakeTerminal::with_input(b"a");
        device.fail_next_poll(io::ErrorKind::Other);
        let deadline = Instant::now() + Duration::from_secs(5);
        assert!(!wait_for_input(&mut device, deadline));
        // The error is one-shot.
        assert!(wait_for_input(&mut device, deadline));
    }
}
