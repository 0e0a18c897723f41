// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte values and defaults used by the console input state machine.

// Skip rustfmt for rest of file to preserve manual alignment.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

use std::time::Duration;

// ==================== Raw input bytes ====================

/// ESC byte (27 in decimal, 0x1B in hex). Never stored in the trie on its own, since it
/// is the first byte of most multi-byte key sequences.
pub const ANSI_ESC: u8         = 0x1B;

/// Horizontal tab (0x09). Always mapped to [`KeyCode::Tab`].
///
/// [`KeyCode::Tab`]: crate::KeyCode::Tab
pub const ASCII_TAB: u8        = b'\t';

/// Line feed (0x0A). Fallback sequence for [`KeyCode::Enter`].
///
/// [`KeyCode::Enter`]: crate::KeyCode::Enter
pub const ASCII_LF: u8         = b'\n';

/// Backspace (0x08). Fallback sequence for [`KeyCode::Backspace`].
///
/// [`KeyCode::Backspace`]: crate::KeyCode::Backspace
pub const ASCII_BS: u8         = 0x08;

// ==================== Defaults ====================

/// Capacity of the input FIFO. Also the upper bound on the length of any key sequence
/// that can be recognized.
pub const DEFAULT_FIFO_CAPACITY: usize = 256;

/// How long to wait for the rest of a multi-byte key sequence once its first byte has
/// matched the trie.
pub const DEFAULT_ESCAPE_SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Size of the scratch buffer used to reconstruct a key sequence from the trie when
/// synthesizing fallback sequences (one byte is reserved for the `ESC` prefix).
pub const SYNTHESIS_BUFFER_SIZE: usize = 32;
