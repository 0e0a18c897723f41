// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the terminal and the line editor.

// Attach.
pub mod fake_terminal;
pub mod scripted_line_editor;

// Re-export.
pub use fake_terminal::*;
pub use scripted_line_editor::*;
