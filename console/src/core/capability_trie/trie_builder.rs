// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words kcbt kdch kent kich kcuu kcud kcub kcuf kprv knxt khome kfnd kslt kpp knp

//! Builds the [`CapabilityTrie`] for a terminal. See [`build_capability_trie()`] docs.

use crate::{ANSI_ESC, ASCII_BS, ASCII_LF, ASCII_TAB, CapabilitySource, CapabilityTrie,
            KeyCode, SYNTHESIS_BUFFER_SIZE};

/// terminfo capability names for the keys the reader recognizes.
pub const PRIMARY_KEY_CAPABILITIES: [(&str, KeyCode); 13] = [
    ("kbs", KeyCode::Backspace),
    ("kcbt", KeyCode::BackTab),
    ("kdch1", KeyCode::Delete),
    ("kent", KeyCode::Enter),
    ("kich1", KeyCode::Insert),
    ("kcuu1", KeyCode::Up),
    ("kcud1", KeyCode::Down),
    ("kcub1", KeyCode::Left),
    ("kcuf1", KeyCode::Right),
    ("kprv", KeyCode::Previous),
    ("knxt", KeyCode::Next),
    ("khome", KeyCode::Home),
    ("kend", KeyCode::End),
];

/// Alternate names for Home / End, only consulted if the primary table didn't resolve
/// them. Some terminals only describe these keys as find / select.
pub const BACKUP_KEY_CAPABILITIES: [(&str, KeyCode); 2] =
    [("kfnd", KeyCode::Home), ("kslt", KeyCode::End)];

/// Build the key trie for the terminal described by `source`.
///
/// In order:
/// 1. `\t` → [`KeyCode::Tab`], unconditionally.
/// 2. Every entry of [`PRIMARY_KEY_CAPABILITIES`] the terminal defines.
/// 3. Entries of [`BACKUP_KEY_CAPABILITIES`] for keys still missing.
/// 4. [`KeyCode::Previous`] / [`KeyCode::Next`] as `ESC` + the Left / Right sequence
///    (meta + arrow), if they are still missing and Left / Right are known.
/// 5. `\n` → [`KeyCode::Enter`] and `\b` → [`KeyCode::Backspace`] if still missing.
///
/// `ESC` on its own is never inserted: it prefixes most other sequences, so the reader
/// recognizes a lone `ESC` only after the trie fails to match a continuation.
pub fn build_capability_trie(source: &impl CapabilitySource) -> CapabilityTrie {
    let mut trie = CapabilityTrie::new();

    trie.insert(&[ASCII_TAB], KeyCode::Tab);

    for (name, code) in PRIMARY_KEY_CAPABILITIES {
        insert_capability(&mut trie, source, name, code);
    }

    for (name, code) in BACKUP_KEY_CAPABILITIES {
        if !trie.contains(code) {
            insert_capability(&mut trie, source, name, code);
        }
    }

    synthesize_meta_arrow(&mut trie, KeyCode::Previous, KeyCode::Left);
    synthesize_meta_arrow(&mut trie, KeyCode::Next, KeyCode::Right);

    for (byte, code) in [(ASCII_LF, KeyCode::Enter), (ASCII_BS, KeyCode::Backspace)] {
        if !trie.contains(code) {
            tracing::debug!(?code, byte, "using hard coded fallback sequence");
            trie.insert(&[byte], code);
        }
    }

    tracing::debug!(nodes = trie.node_count(), "built capability trie");
    trie
}

fn insert_capability(
    trie: &mut CapabilityTrie,
    source: &impl CapabilitySource,
    name: &str,
    code: KeyCode,
) {
    match source.string(name) {
        Some(sequence) => trie.insert(sequence, code),
        None => tracing::trace!(name, ?code, "capability not defined"),
    }
}

/// Map `target` to `ESC` + the sequence of `arrow`. Skipped if `target` is already in
/// the trie or `arrow` isn't. A sequence too long for the scratch buffer aborts only
/// this step.
fn synthesize_meta_arrow(trie: &mut CapabilityTrie, target: KeyCode, arrow: KeyCode) {
    if trie.contains(target) {
        return;
    }

    let mut scratch = [0_u8; SYNTHESIS_BUFFER_SIZE];
    scratch[0] = ANSI_ESC;
    match trie.sequence_into(arrow, &mut scratch[1..]) {
        Ok(Some(len)) => {
            tracing::debug!(?target, ?arrow, "synthesized meta + arrow sequence");
            trie.insert(&scratch[..=len], target);
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(?target, ?arrow, %err, "can't synthesize meta + arrow sequence");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CapabilityTable, TrieStep};
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    fn matches(trie: &CapabilityTrie, bytes: &[u8]) -> Option<KeyCode> {
        let mut chain = trie.root();
        for byte in bytes {
            match trie.step(chain, *byte) {
                TrieStep::Complete(code) => return Some(code),
                TrieStep::Partial(next) => chain = next,
                TrieStep::NoMatch => return None,
            }
        }
        None
    }

    #[test_case(b"\x7f", KeyCode::Backspace)]
    #[test_case(b"\x1b[Z", KeyCode::BackTab)]
    #[test_case(b"\x1b[3~", KeyCode::Delete)]
    #[test_case(b"\x1b[2~", KeyCode::Insert)]
    #[test_case(b"\x1b[A", KeyCode::Up)]
    #[test_case(b"\x1b[B", KeyCode::Down)]
    #[test_case(b"\x1b[D", KeyCode::Left)]
    #[test_case(b"\x1b[C", KeyCode::Right)]
    #[test_case(b"\x1b[5~", KeyCode::Previous)]
    #[test_case(b"\x1b[6~", KeyCode::Next)]
    #[test_case(b"\x1b[H", KeyCode::Home)]
    #[test_case(b"\x1b[F", KeyCode::End)]
    #[test_case(b"\t", KeyCode::Tab)]
    #[test_case(b"\n", KeyCode::Enter)]
    fn test_vt100_sequences_round_trip(bytes: &[u8], code: KeyCode) {
        let trie = build_capability_trie(&CapabilityTable::vt100());
        assert_eq!(matches(&trie, bytes), Some(code));
    }

    #[test]
    fn test_vt100_reaches_every_special_key() {
        let trie = build_capability_trie(&CapabilityTable::vt100());
        for code in KeyCode::iter().filter(|it| !matches!(it, KeyCode::Char | KeyCode::Escape)) {
            let sequence = trie.sequence(code);
            assert!(sequence.is_some(), "{code:?} is not in the trie");
            assert_eq!(matches(&trie, &sequence.unwrap()), Some(code));
        }
    }

    #[test]
    fn test_every_primary_capability_is_recognized() {
        let mut table = CapabilityTable::new();
        for (index, (name, _)) in PRIMARY_KEY_CAPABILITIES.iter().enumerate() {
            let index = u8::try_from(index).unwrap();
            table = table.with_string(*name, vec![ANSI_ESC, b'[', b'a' + index]);
        }
        let trie = build_capability_trie(&table);
        for (index, (_, code)) in PRIMARY_KEY_CAPABILITIES.iter().enumerate() {
            let index = u8::try_from(index).unwrap();
            assert_eq!(matches(&trie, &[ANSI_ESC, b'[', b'a' + index]), Some(*code));
        }
    }

    #[test]
    fn test_escape_is_not_in_trie() {
        let trie = build_capability_trie(&CapabilityTable::vt100());
        assert!(!trie.contains(KeyCode::Escape));
        assert_eq!(matches(&trie, &[ANSI_ESC]), None);
    }

    #[test]
    fn test_backup_used_only_when_primary_missing() {
        let table = CapabilityTable::new()
            .with_string("khome", b"\x1b[1~")
            .with_string("kfnd", b"\x1b[H")
            .with_string("kslt", b"\x1b[4~");
        let trie = build_capability_trie(&table);

        assert_eq!(trie.sequence(KeyCode::Home).unwrap().as_slice(), b"\x1b[1~");
        assert_eq!(matches(&trie, b"\x1b[H"), None);
        assert_eq!(trie.sequence(KeyCode::End).unwrap().as_slice(), b"\x1b[4~");
    }

    #[test]
    fn test_meta_arrow_synthesis() {
        let table = CapabilityTable::new()
            .with_string("kcub1", b"\x1bL")
            .with_string("kcuf1", b"\x1bR");
        let trie = build_capability_trie(&table);

        assert_eq!(matches(&trie, b"\x1b\x1bL"), Some(KeyCode::Previous));
        assert_eq!(matches(&trie, b"\x1b\x1bR"), Some(KeyCode::Next));
        assert_eq!(matches(&trie, b"\x1bL"), Some(KeyCode::Left));
    }

    #[test]
    fn test_page_keys_do_not_stand_in_for_previous_next() {
        let table = CapabilityTable::new()
            .with_string("kcub1", b"\x1bOD")
            .with_string("kcuf1", b"\x1bOC")
            .with_string("kpp", b"\x1b[5~")
            .with_string("knp", b"\x1b[6~");
        let trie = build_capability_trie(&table);

        assert_eq!(
            trie.sequence(KeyCode::Previous).unwrap().as_slice(),
            b"\x1b\x1bOD"
        );
        assert_eq!(trie.sequence(KeyCode::Next).unwrap().as_slice(), b"\x1b\x1bOC");
        assert_eq!(matches(&trie, b"\x1b[5~"), None);
        assert_eq!(matches(&trie, b"\x1b[6~"), None);
    }

    #[test]
    fn test_no_synthesis_without_arrows() {
        let trie = build_capability_trie(&CapabilityTable::new());
        assert!(!trie.contains(KeyCode::Previous));
        assert!(!trie.contains(KeyCode::Next));
    }

    #[test]
    fn test_no_synthesis_when_previous_defined() {
        let table = CapabilityTable::new()
            .with_string("kcub1", b"\x1bL")
            .with_string("kprv", b"\x1b[P");
        let trie = build_capability_trie(&table);
        assert_eq!(trie.sequence(KeyCode::Previous).unwrap().as_slice(), b"\x1b[P");
        assert_eq!(matches(&trie, b"\x1b\x1bL"), None);
    }

    #[test]
    fn test_synthesis_skipped_when_arrow_too_long() {
        let long_left = vec![b'x'; SYNTHESIS_BUFFER_SIZE];
        let table = CapabilityTable::new().with_string("kcub1", long_left);
        let trie = build_capability_trie(&table);
        assert!(trie.contains(KeyCode::Left));
        assert!(!trie.contains(KeyCode::Previous));
        // The rest of the build still ran.
        assert!(trie.contains(KeyCode::Enter));
    }

    #[test]
    fn test_enter_and_backspace_hard_fallbacks() {
        let trie = build_capability_trie(&CapabilityTable::new());
        assert_eq!(matches(&trie, b"\n"), Some(KeyCode::Enter));
        assert_eq!(matches(&trie, b"\x08"), Some(KeyCode::Backspace));
        assert_eq!(matches(&trie, b"\t"), Some(KeyCode::Tab));
    }

    #[test]
    fn test_defined_enter_suppresses_fallback() {
        let table = CapabilityTable::new().with_string("kent", b"\x1bOM");
        let trie = build_capability_trie(&table);
        assert_eq!(matches(&trie, b"\x1bOM"), Some(KeyCode::Enter));
        assert_eq!(matches(&trie, b"\n"), None);
    }
}
