/*
 * hfill.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that turns `\hfill` into a right-floated span.
 */

use euldoc_pandoc_types::{Inline, Pandoc};

use crate::Result;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::{inline_keys, locate_inline_mut};

use super::zwnj;

pub const TOMBSTONE_CLASS: &str = "tombstone";
const TOMBSTONE_STYLE: &str = "float:right;";

fn is_hfill(inline: &Inline) -> bool {
    matches!(inline, Inline::RawInline(raw) if raw.format == "tex" && raw.text.trim() == "\\hfill")
}

/// Replaces a TeX `\hfill` marker and everything after it in the same
/// inline sequence with a span floated to the right.
pub struct HfillTransform;

impl HfillTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HfillTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for HfillTransform {
    fn name(&self) -> &str {
        "hfill"
    }

    fn transform(&self, ast: &mut Pandoc, _ctx: &mut TransformContext) -> Result<()> {
        let markers = inline_keys(ast, is_hfill);

        for key in &markers {
            let (inlines, index) = locate_inline_mut(ast, *key)?;
            let mut trailing = inlines.split_off(index);
            trailing.remove(0);

            let mut content = Vec::with_capacity(trailing.len() + 1);
            content.push(zwnj());
            content.append(&mut trailing);

            inlines.push(Inline::span(
                (
                    String::new(),
                    vec![TOMBSTONE_CLASS.to_string()],
                    vec![("style".to_string(), TOMBSTONE_STYLE.to_string())],
                ),
                content,
            ));
        }

        tracing::debug!(count = markers.len(), "Replaced hfill markers");
        Ok(())
    }
}
