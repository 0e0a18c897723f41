// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Connect to source file.
pub mod capability_trie;
pub mod console_in;
pub mod console_out;
pub mod constants;
pub mod error;
pub mod input_fifo;
pub mod log;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export.
pub use capability_trie::*;
pub use console_in::*;
pub use console_out::*;
pub use constants::*;
pub use error::*;
pub use input_fifo::*;
pub use log::*;
pub use terminal_io::*;
pub use test_fixtures::*;
