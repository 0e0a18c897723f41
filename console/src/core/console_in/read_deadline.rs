// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::{Duration, Instant};

/// How long [`ConsoleIn::read_char()`] may wait for the first byte of a key.
///
/// | Variant     | Empty FIFO                                                  |
/// | :---------- | :---------------------------------------------------------- |
/// | `Immediate` | Fail with [`Timeout`] right away, only buffered bytes count |
/// | `At`        | Wait until the instant, then fail with [`Timeout`]          |
/// | `Forever`   | Block on the device read                                    |
///
/// The rest of a multi-byte sequence is waited for separately, bounded by
/// [`ConsoleInConfig::escape_sequence_timeout`] and by this deadline, whichever ends
/// first.
///
/// [`ConsoleIn::read_char()`]: crate::ConsoleIn::read_char
/// [`ConsoleInConfig::escape_sequence_timeout`]: crate::ConsoleInConfig::escape_sequence_timeout
/// [`Timeout`]: crate::ConsoleError::Timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDeadline {
    Immediate,
    At(Instant),
    Forever,
}

impl ReadDeadline {
    /// Deadline `timeout` from now.
    #[must_use]
    pub fn after(timeout: Duration) -> Self { ReadDeadline::At(Instant::now() + timeout) }

    /// The instant to stop waiting, capped at `cap`. `Immediate` means "already
    /// passed" and `Forever` means "no cap other than `cap`".
    #[must_use]
    pub fn capped_at(&self, cap: Instant) -> Instant {
        match self {
            ReadDeadline::Immediate => Instant::now(),
            ReadDeadline::At(deadline) => (*deadline).min(cap),
            ReadDeadline::Forever => cap,
        }
    }
}

impl From<Duration> for ReadDeadline {
    fn from(timeout: Duration) -> Self { ReadDeadline::after(timeout) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_capped_at() {
        let now = Instant::now();
        let cap = now + Duration::from_secs(1);

        assert_eq!(ReadDeadline::Forever.capped_at(cap), cap);

        let early = now + Duration::from_millis(10);
        assert_eq!(ReadDeadline::At(early).capped_at(cap), early);

        let late = now + Duration::from_secs(60);
        assert_eq!(ReadDeadline::At(late).capped_at(cap), cap);

        assert!(ReadDeadline::Immediate.capped_at(cap) < cap);
    }

    #[test]
    fn test_after_is_in_the_future() {
        let before = Instant::now();
        let ReadDeadline::At(deadline) = ReadDeadline::after(Duration::from_secs(5)) else {
            panic!("expected ReadDeadline::At");
        };
        assert!(deadline > before);
    }
}
