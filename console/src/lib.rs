// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo termios tigetstr conin

//! # r3bl_console
//!
//! Console input for Linux terminals, built around a small state machine that turns a
//! stream of raw bytes from the terminal into logical keys.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [How it works](#how-it-works)
//! - [Line mode and raw mode](#line-mode-and-raw-mode)
//! - [Usage](#usage)
//! - [Logging](#logging)
//! <!-- /TOC -->
//!
//! # How it works
//!
//! ```text
//! ┌──────────┐  byte  ┌────────────┐  peek   ┌─────────────────┐
//! │ terminal ├───────►│ TermFifo   ├────────►│ CapabilityTrie  │
//! │ (fd 0)   │  push  │ head..tail │◄────────┤ step(byte)      │
//! └──────────┘        └────────────┘ commit/ └────────┬────────┘
//!      ▲                                  rollback     │
//!      │ wait_for_input(deadline)                      ▼
//!      └──────────────────────────────── ConsoleIn::read_char() → ConsoleKey
//! ```
//!
//! 1. The first time a key is requested, the terminal is switched to single character
//!    mode and a [`CapabilityTrie`] is built from the terminfo database: every special
//!    key (arrows, Home, End, Delete, ...) becomes a path of bytes in the trie.
//! 2. Bytes are pushed into a fixed capacity [`TermFifo`] one at a time. The reader
//!    *peeks* through them while walking the trie, so a failed match can be rolled
//!    back without losing input.
//! 3. A complete match yields its [`KeyCode`]. A byte that starts no known sequence is
//!    reported as [`KeyCode::Char`] (or [`KeyCode::Escape`] for a lone `ESC`).
//!
//! # Line mode and raw mode
//!
//! [`ConsoleIn::read_char()`] forces [`TerminalMode::Raw`], and
//! [`ConsoleIn::read_line()`] forces [`TerminalMode::Line`]. The attributes captured
//! before the first switch are restored when the handle goes back to line mode or is
//! closed.
//!
//! # Usage
//!
//! ```no_run
//! use r3bl_console::{ConsoleIn, ConsoleInConfig, KeyCode, ReadDeadline};
//! use std::time::Duration;
//!
//! # fn main() -> miette::Result<()> {
//! let mut console = ConsoleIn::open_stdin(ConsoleInConfig::default())?;
//! loop {
//!     match console.read_char(ReadDeadline::after(Duration::from_secs(5))) {
//!         Ok(key) if key.code == KeyCode::Escape => break,
//!         Ok(key) => println!("{key}\r"),
//!         // Nothing pressed yet, keep waiting.
//!         Err(err) if err.is_timeout() => {}
//!         Err(err) => return Err(err.into()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events. Use [`TracingConfig`] to install a subscriber;
//! prefer a file writer while the terminal is in raw mode.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
// Production code denies unwrap in functions that return Result. Test code is
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod core;

// Re-export.
pub use core::*;
