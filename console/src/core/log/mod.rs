// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Optional [`tracing`] subscriber setup. The library only emits events; binaries and
//! tests install a subscriber with [`TracingConfig`].
//!
//! While the terminal is in raw mode, log lines written to stdout land in the middle of
//! whatever the application is drawing, so prefer [`WriterConfig::File`].

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
