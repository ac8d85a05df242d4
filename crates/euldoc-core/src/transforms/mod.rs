/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The document passes.
 */

//! The document passes.
//!
//! - [`DateTransform`] - Adds today's date to metadata that has none
//! - [`SeparatorTransform`] - Turns horizontal rules into layout breaks
//! - [`PreviewLinkTransform`] - Unwraps links marked as previews
//! - [`LightweightSectionTransform`] - Promotes bold lead-ins to headers
//! - [`AutoIdentifierTransform`] - Gives every header a unique identifier
//! - [`AutolinkHeadingTransform`] - Makes headers and the title link to themselves
//! - [`SvgImageTransform`] - Prefers `.svg` siblings of local images
//! - [`HfillTransform`] - Floats content after `\hfill` to the right
//!
//! These transforms implement [`AstTransform`](crate::transform::AstTransform) and
//! can be added to a [`TransformPipeline`](crate::transform::TransformPipeline).

mod auto_identifiers;
mod autolink_headings;
mod hfill;
mod lightweight_sections;
mod preview_links;
mod separators;
mod svg_images;
mod today;

pub use auto_identifiers::AutoIdentifierTransform;
pub use autolink_headings::AutolinkHeadingTransform;
pub use hfill::HfillTransform;
pub use lightweight_sections::{DEFAULT_SECTION_LEVEL, LightweightSectionTransform};
pub use preview_links::PreviewLinkTransform;
pub use separators::SeparatorTransform;
pub use svg_images::{SvgImageTransform, svg_sibling};
pub use today::{DateTransform, format_date};

use euldoc_pandoc_types::{Block, Header, Inline, NodeKey, Pandoc};

use crate::traversals::locate_block_mut;
use crate::{EuldocError, Result};

/// The invisible marker left where visible lead-in text was removed.
fn zwnj() -> Inline {
    Inline::raw("html", "&zwnj;")
}

/// The header identified by `key`.
fn header_mut(ast: &mut Pandoc, key: NodeKey) -> Result<&mut Header> {
    let (blocks, index) = locate_block_mut(ast, key)?;
    match &mut blocks[index] {
        Block::Header(header) => Ok(header),
        other => Err(EuldocError::Transform(format!(
            "expected Header at {}, found {}",
            key,
            other.tag()
        ))),
    }
}
