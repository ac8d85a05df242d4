/*
 * preview_links.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that unwraps preview links.
 */

use euldoc_pandoc_types::{Inline, Pandoc, has_class};

use crate::Result;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::{inline_keys, locate_inline_mut};

/// Class marking a link that only exists for the HTML preview.
pub const PREVIEW_CLASS: &str = "preview";

/// Replaces each link carrying the `preview` class by its own content.
///
/// The link's inlines are spliced into the enclosing sequence at the link's
/// position; the anchor itself is dropped.
pub struct PreviewLinkTransform;

impl PreviewLinkTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PreviewLinkTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for PreviewLinkTransform {
    fn name(&self) -> &str {
        "preview-links"
    }

    fn transform(&self, ast: &mut Pandoc, _ctx: &mut TransformContext) -> Result<()> {
        let links = inline_keys(ast, |inline| {
            matches!(inline, Inline::Link(link) if has_class(&link.attr, PREVIEW_CLASS))
        });
        for key in &links {
            let (inlines, index) = locate_inline_mut(ast, *key)?;
            if let Inline::Link(link) = &mut inlines[index] {
                let content = std::mem::take(&mut link.content);
                inlines.splice(index..=index, content);
            }
        }
        tracing::debug!(count = links.len(), "Unwrapped preview links");
        Ok(())
    }
}
