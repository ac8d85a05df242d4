/*
 * autolink_headings.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that makes headers link to themselves.
 */

use euldoc_pandoc_types::{Block, Inline, MetaValue, Pandoc};

use crate::Result;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::{NodeRef, block_keys, descendants};

use super::header_mut;

/// Wraps each header's content in a link to the header's own anchor, and
/// the document title in a link to the top of the page.
///
/// A header whose content already holds a link anywhere inside it is left
/// as is. An inline title is always wrapped. Identifiers must already be
/// assigned.
pub struct AutolinkHeadingTransform;

impl AutolinkHeadingTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AutolinkHeadingTransform {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_link(inlines: &[Inline]) -> bool {
    descendants(NodeRef::Inlines(inlines))
        .any(|node| matches!(node.as_inline(), Some(Inline::Link(_))))
}

/// Replace `content` by a single link to `url` wrapping it.
fn wrap_in_link(content: &mut Vec<Inline>, url: String) {
    let inner = std::mem::take(content);
    content.push(Inline::self_link(inner, url));
}

impl AstTransform for AutolinkHeadingTransform {
    fn name(&self) -> &str {
        "autolink-headings"
    }

    fn transform(&self, ast: &mut Pandoc, _ctx: &mut TransformContext) -> Result<()> {
        if let Some(MetaValue::MetaInlines(title)) = ast.meta.get_mut("title") {
            wrap_in_link(title, "#".to_string());
        }

        let headers = block_keys(ast, |block| matches!(block, Block::Header(_)));
        let mut linked = 0;
        for key in &headers {
            let header = header_mut(ast, *key)?;
            if contains_link(&header.content) {
                continue;
            }
            let url = format!("#{}", header.attr.0);
            wrap_in_link(&mut header.content, url);
            linked += 1;
        }
        tracing::debug!(headers = headers.len(), linked, "Linked headers to their anchors");
        Ok(())
    }
}
