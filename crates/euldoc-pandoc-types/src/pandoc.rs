/*
 * pandoc.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub use crate::block::Blocks;
use crate::meta::Meta;

/// The pandoc API version written when a document does not carry one.
pub const DEFAULT_API_VERSION: [i64; 3] = [1, 23, 1];

/*
 * A data structure that mimics Pandoc's `data Pandoc` type.
 * This is the root of every document a filter receives.
 */

#[derive(Debug, Clone, PartialEq)]
pub struct Pandoc {
    /// The `pandoc-api-version` the document was produced with.
    pub api_version: Vec<i64>,
    pub meta: Meta,
    pub blocks: Blocks,
}

impl Default for Pandoc {
    fn default() -> Self {
        Pandoc {
            api_version: DEFAULT_API_VERSION.to_vec(),
            meta: Meta::new(),
            blocks: Vec::new(),
        }
    }
}

impl Pandoc {
    pub fn new(meta: Meta, blocks: Blocks) -> Self {
        Pandoc {
            meta,
            blocks,
            ..Default::default()
        }
    }
}
