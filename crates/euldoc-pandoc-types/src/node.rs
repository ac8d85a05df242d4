/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Instance identity for AST nodes.
//!
//! Every block and inline carries a [`NodeId`] that is assigned when the node
//! is constructed. Two nodes can be structurally equal (two `Space`s, two
//! identical `Str`s) while still being different instances; transforms that
//! relocate or remove a node match on identity so that such lookalikes are
//! never confused.
//!
//! - Moving a node keeps its id.
//! - Cloning a node produces a new instance, so the clone gets a fresh id.
//! - `NodeId` is invisible to `PartialEq`: derived equality on AST types stays
//!   purely structural. Compare instances through [`NodeKey`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity slot embedded in every block and inline struct.
pub struct NodeId(u64);

/// Copyable handle used to compare node identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

impl NodeId {
    /// Allocate a new, never before used identity.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn key(&self) -> NodeKey {
        NodeKey(self.0)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::fresh()
    }
}

impl Clone for NodeId {
    // a clone is a distinct instance
    fn clone(&self) -> Self {
        NodeId::fresh()
    }
}

impl PartialEq for NodeId {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for NodeId {}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
