// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Arena backed n-ary trie over raw input bytes. See [`CapabilityTrie`] docs.

use crate::{ConsoleError, ConsoleResult, KeyCode};
use smallvec::SmallVec;

/// Index of a [`TrieNode`] inside its [`CapabilityTrie`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One byte position in the trie.
///
/// `child` leads to the next byte of the same sequence; `sibling` leads to an alternate
/// byte at the same depth. `code` is set on the node where a sequence ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode {
    pub value: u8,
    pub code: Option<KeyCode>,
    pub child: Option<NodeId>,
    pub sibling: Option<NodeId>,
}

impl TrieNode {
    fn new(value: u8) -> Self {
        Self {
            value,
            code: None,
            child: None,
            sibling: None,
        }
    }
}

/// Outcome of feeding one byte to the trie at some depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieStep {
    /// No node at this depth matches the byte.
    NoMatch,
    /// The byte completes a sequence.
    Complete(KeyCode),
    /// The byte matches but the sequence continues. Holds the head of the next sibling
    /// chain to match against (`None` if the node has no children).
    Partial(Option<NodeId>),
}

/// Maps terminal key sequences (raw bytes) to [`KeyCode`]s.
///
/// # Layout
///
/// Nodes live in a single `Vec` and refer to each other by [`NodeId`]. The tree is the
/// classic first-child / next-sibling encoding of an n-ary trie:
///
/// ```text
/// Tab = 09, Up = 1B 5B 41, Down = 1B 5B 42, Home = 1B 4F 48
///
/// root ─► [09:Tab] ──sibling──► [1B]
///                                │ child
///                                ▼
///                               [5B] ──sibling──► [4F]
///                                │ child           │ child
///                                ▼                 ▼
///                               [41:Up] ─► [42:Down]   [48:Home]
/// ```
///
/// The whole trie is dropped as a unit with its arena.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTrie {
    nodes: Vec<TrieNode>,
    root: Option<NodeId>,
}

impl CapabilityTrie {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Head of the top level sibling chain (`None` for an empty trie).
    #[must_use]
    pub fn root(&self) -> Option<NodeId> { self.root }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &TrieNode { &self.nodes[id.0] }

    #[must_use]
    pub fn node_count(&self) -> usize { self.nodes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Add `sequence` → `code`. An empty sequence (capability not defined by the
    /// terminal) is silently ignored.
    ///
    /// Sequences that are prefixes or extensions of each other coexist: a node can gain
    /// a `code` after it already has children, and children can be added below a node
    /// that already has a `code`.
    pub fn insert(&mut self, sequence: &[u8], code: KeyCode) {
        let Some(last) = sequence.len().checked_sub(1) else {
            return;
        };

        let mut parent: Option<NodeId> = None;
        let mut chain = self.root;

        for (depth, &byte) in sequence.iter().enumerate() {
            let id = match self.find_in_chain(chain, byte) {
                Some(id) => id,
                None => self.append_to_chain(parent, chain, byte),
            };
            if depth == last {
                self.nodes[id.0].code = Some(code);
            }
            parent = Some(id);
            chain = self.nodes[id.0].child;
        }
    }

    /// Match `byte` against the sibling chain starting at `chain`.
    #[must_use]
    pub fn step(&self, chain: Option<NodeId>, byte: u8) -> TrieStep {
        match self.find_in_chain(chain, byte) {
            None => TrieStep::NoMatch,
            Some(id) => {
                let node = self.node(id);
                match node.code {
                    Some(code) => TrieStep::Complete(code),
                    None => TrieStep::Partial(node.child),
                }
            }
        }
    }

    /// Find the node that carries `code`, searching depth first (children before the
    /// node's own code, then siblings).
    #[must_use]
    pub fn lookup(&self, code: KeyCode) -> Option<NodeId> {
        let mut path = SmallVec::<[NodeId; 16]>::new();
        self.find_path(self.root, code, &mut path)
            .then(|| path.last().copied())
            .flatten()
    }

    #[must_use]
    pub fn contains(&self, code: KeyCode) -> bool { self.lookup(code).is_some() }

    /// Reconstruct the byte sequence for `code` into `out`.
    ///
    /// Returns `Ok(None)` if `code` is not in the trie, otherwise the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InsufficientBuffer`] if `out` is shorter than the
    /// sequence. Nothing is written in that case.
    pub fn sequence_into(&self, code: KeyCode, out: &mut [u8]) -> ConsoleResult<Option<usize>> {
        let mut path = SmallVec::<[NodeId; 16]>::new();
        if !self.find_path(self.root, code, &mut path) {
            return Ok(None);
        }
        if path.len() > out.len() {
            return Err(ConsoleError::InsufficientBuffer {
                needed: path.len(),
                available: out.len(),
            });
        }
        for (slot, id) in out.iter_mut().zip(&path) {
            *slot = self.node(*id).value;
        }
        Ok(Some(path.len()))
    }

    /// Owned copy of the byte sequence for `code`, if present.
    #[must_use]
    pub fn sequence(&self, code: KeyCode) -> Option<SmallVec<[u8; 16]>> {
        let mut path = SmallVec::<[NodeId; 16]>::new();
        self.find_path(self.root, code, &mut path)
            .then(|| path.iter().map(|id| self.node(*id).value).collect())
    }

    fn find_in_chain(&self, mut chain: Option<NodeId>, byte: u8) -> Option<NodeId> {
        while let Some(id) = chain {
            let node = self.node(id);
            if node.value == byte {
                return Some(id);
            }
            chain = node.sibling;
        }
        None
    }

    /// Create a node for `byte` at the end of `chain`. If the chain is empty the new
    /// node becomes the first child of `parent` (or the root).
    fn append_to_chain(
        &mut self,
        parent: Option<NodeId>,
        chain: Option<NodeId>,
        byte: u8,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TrieNode::new(byte));

        match chain {
            Some(mut last) => {
                while let Some(next) = self.nodes[last.0].sibling {
                    last = next;
                }
                self.nodes[last.0].sibling = Some(id);
            }
            None => match parent {
                Some(parent) => self.nodes[parent.0].child = Some(id),
                None => self.root = Some(id),
            },
        }

        id
    }

    fn find_path(
        &self,
        mut chain: Option<NodeId>,
        code: KeyCode,
        path: &mut SmallVec<[NodeId; 16]>,
    ) -> bool {
        while let Some(id) = chain {
            path.push(id);
            let node = self.node(id);
            if self.find_path(node.child, code, path) {
                return true;
            }
            if node.code == Some(code) {
                return true;
            }
            path.pop();
            chain = node.sibling;
        }
        false
    }
}
