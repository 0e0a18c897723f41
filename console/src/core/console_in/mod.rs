// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The console input state machine. See [`ConsoleIn`] docs.

// Attach sources.
pub mod console_in_config;
pub mod console_in_impl;
pub mod key;
pub mod line_editor;
pub mod read_deadline;
pub mod recall_history;

// Re-export.
pub use console_in_config::*;
pub use console_in_impl::*;
pub use key::*;
pub use line_editor::*;
pub use read_deadline::*;
pub use recall_history::*;
