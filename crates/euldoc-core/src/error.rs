/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for euldoc-core

use euldoc_pandoc_types::NodeKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EuldocError {
    /// An inline the identifier deriver has no rendering for.
    #[error("Malformed AST: unexpected {tag} while deriving an identifier")]
    MalformedAst { tag: &'static str },

    /// A node a pass found during its walk is no longer held by a container
    /// of the expected kind.
    #[error("Node {node} has no enclosing {expected}")]
    MissingParent {
        node: NodeKey,
        expected: &'static str,
    },

    #[error("Transform error: {0}")]
    Transform(String),
}

impl EuldocError {
    pub fn missing_parent(node: NodeKey, expected: &'static str) -> Self {
        Self::MissingParent { node, expected }
    }
}

pub type Result<T> = std::result::Result<T, EuldocError>;
