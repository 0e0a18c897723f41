// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios

//! Everything that touches the terminal descriptor: byte input, readiness waits, and
//! the line / raw mode switch.

// Attach sources.
pub mod input_device;
pub mod terminal_mode;
pub mod tty;

// Re-export.
pub use input_device::*;
pub use terminal_mode::*;
pub use tty::*;
