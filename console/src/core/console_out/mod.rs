// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod console_out_impl;
pub mod padding;

// Re-export.
pub use console_out_impl::*;
pub use padding::*;
