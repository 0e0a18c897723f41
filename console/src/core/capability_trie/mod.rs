// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo

//! Key sequence recognition: a byte trie built from terminal capabilities.
//!
//! - [`CapabilityTrie`]: the trie itself, an arena of [`TrieNode`]s.
//! - [`CapabilitySource`]: name → sequence lookups, backed by terminfo
//!   ([`TerminfoCapabilities`]) or an in-memory [`CapabilityTable`].
//! - [`build_capability_trie()`]: the build algorithm, including fallback sequences.

// Attach sources.
pub mod capability_source;
pub mod terminfo_source;
pub mod trie;
pub mod trie_builder;

// Re-export.
pub use capability_source::*;
pub use terminfo_source::*;
pub use trie::*;
pub use trie_builder::*;
