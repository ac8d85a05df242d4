/*
 * lightweight_sections.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that promotes bold paragraph lead-ins to headers.
 */

//! Lightweight sections.
//!
//! A paragraph that opens with a bold run, such as
//! `**Proof.** The claim follows...`, starts a small section. The bold text
//! becomes a header inserted just before the paragraph, and the paragraph
//! keeps the rest of its text behind a zero-width non-joiner so it still
//! renders with its original leading spacing.
//!
//! Paragraphs inside ordered, bullet or definition lists are left alone.
//!
//! Sections created this way have no closing marker; a trailing tombstone,
//! if wanted, has to be added by the page scripts.

use std::ops::ControlFlow;

use euldoc_pandoc_types::{Block, Inline, NodeKey, Pandoc, empty_attr};

use crate::Result;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::{NodeRef, Visitor, locate_block_mut, walk};

use super::zwnj;

pub const DEFAULT_SECTION_LEVEL: usize = 3;

pub struct LightweightSectionTransform {
    level: usize,
}

impl LightweightSectionTransform {
    pub fn new(level: usize) -> Self {
        Self { level }
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

impl Default for LightweightSectionTransform {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_LEVEL)
    }
}

fn is_list(node: NodeRef<'_>) -> bool {
    node.as_block().is_some_and(Block::is_list)
}

fn opens_with_strong(block: &Block) -> bool {
    let content = match block {
        Block::Paragraph(p) => &p.content,
        Block::Plain(p) => &p.content,
        _ => return false,
    };
    matches!(content.first(), Some(Inline::Strong(_)))
}

/// Collects lead-in paragraphs that are not nested in any list.
#[derive(Default)]
struct LeadInFinder {
    list_depth: usize,
    found: Vec<NodeKey>,
}

impl<'a> Visitor<'a> for LeadInFinder {
    fn visit(&mut self, node: NodeRef<'a>, _path: &[usize]) -> ControlFlow<()> {
        if self.list_depth == 0
            && let Some(block) = node.as_block()
            && opens_with_strong(block)
        {
            self.found.push(block.key());
        }
        ControlFlow::Continue(())
    }

    fn enter(&mut self, node: NodeRef<'a>) {
        if is_list(node) {
            self.list_depth += 1;
        }
    }

    fn exit(&mut self, node: NodeRef<'a>) {
        if is_list(node) {
            self.list_depth -= 1;
        }
    }
}

impl AstTransform for LightweightSectionTransform {
    fn name(&self) -> &str {
        "lightweight-sections"
    }

    fn transform(&self, ast: &mut Pandoc, _ctx: &mut TransformContext) -> Result<()> {
        let mut finder = LeadInFinder::default();
        let _ = walk(NodeRef::Document(ast), &mut finder);

        for key in &finder.found {
            let (blocks, index) = locate_block_mut(ast, *key)?;
            let content = match &mut blocks[index] {
                Block::Paragraph(p) => &mut p.content,
                Block::Plain(p) => &mut p.content,
                _ => continue,
            };
            let heading = match content.first_mut() {
                Some(Inline::Strong(strong)) => std::mem::take(&mut strong.content),
                _ => continue,
            };
            content.remove(0);
            if matches!(content.first(), Some(Inline::Space(_))) {
                content.remove(0);
            }
            content.insert(0, zwnj());
            blocks.insert(index, Block::header(self.level, empty_attr(), heading));
        }
        tracing::debug!(
            count = finder.found.len(),
            level = self.level,
            "Promoted lead-ins to headers"
        );
        Ok(())
    }
}
