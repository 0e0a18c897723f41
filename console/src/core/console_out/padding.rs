// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo tputs

use smallvec::SmallVec;

/// A terminfo string with its `$<..>` delay specifications removed.
///
/// terminfo strings may embed padding like `$<50>` or `$<5*/>`, which `tputs` turns into
/// a pause. Modern terminals don't need it, so it is dropped. A `$<` with no closing
/// `>` is not padding and is kept as is.
///
/// ```
/// use r3bl_console::strip_padding;
///
/// assert_eq!(strip_padding(b"\x1b[H\x1b[2J$<50>").as_slice(), b"\x1b[H\x1b[2J");
/// ```
#[must_use]
pub fn strip_padding(capability: &[u8]) -> SmallVec<[u8; 32]> {
    let mut acc = SmallVec::new();
    let mut index = 0;

    while index < capability.len() {
        if capability[index..].starts_with(b"$<")
            && let Some(len) = capability[index..].iter().position(|it| *it == b'>')
        {
            index += len + 1;
            continue;
        }
        acc.push(capability[index]);
        index += 1;
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(b"\x1b[H\x1b[2J", b"\x1b[H\x1b[2J" ; "no padding")]
    #[test_case(b"\x1b[H$<5>\x1b[2J$<50>", b"\x1b[H\x1b[2J" ; "several delays")]
    #[test_case(b"$<5*/>\x1b[2J", b"\x1b[2J" ; "proportional and mandatory flags")]
    #[test_case(b"a$<5", b"a$<5" ; "unterminated")]
    #[test_case(b"cost $5", b"cost $5" ; "dollar without angle bracket")]
    #[test_case(b"", b"" ; "empty")]
    fn test_strip_padding(input: &[u8], expected: &[u8]) {
        assert_eq!(strip_padding(input).as_slice(), expected);
    }
}
