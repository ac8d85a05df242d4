/*
 * separators.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that rewrites horizontal rules.
 */

use euldoc_pandoc_types::{Block, Pandoc};

use crate::Result;
use crate::pipeline::Mode;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::{block_keys, locate_block_mut};

/// Level of the empty header that stands in for a rule in HTML output.
const SEPARATOR_LEVEL: usize = 3;

/// Rewrites every `HorizontalRule`.
///
/// For HTML the rule becomes an empty level-3 header, which the page styles
/// treat as a layout break. For PDF the rule is removed.
pub struct SeparatorTransform {
    mode: Mode,
}

impl SeparatorTransform {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }
}

impl Default for SeparatorTransform {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl AstTransform for SeparatorTransform {
    fn name(&self) -> &str {
        "separators"
    }

    fn transform(&self, ast: &mut Pandoc, _ctx: &mut TransformContext) -> Result<()> {
        let rules = block_keys(ast, |block| matches!(block, Block::HorizontalRule(_)));
        for key in &rules {
            let (blocks, index) = locate_block_mut(ast, *key)?;
            match self.mode {
                Mode::Html => blocks[index] = Block::empty_header(SEPARATOR_LEVEL),
                Mode::Pdf => {
                    blocks.remove(index);
                }
            }
        }
        tracing::debug!(count = rules.len(), mode = ?self.mode, "Rewrote separators");
        Ok(())
    }
}
