/*
 * identifiers.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Header identifier derivation.
 */

//! Derive an anchor identifier from inline content.
//!
//! The inlines are first rendered to plain text:
//!
//! - text, code, math and raw payloads are kept verbatim;
//! - spaces and line breaks become a single space;
//! - emphasis, strikeout, subscript, small caps, citations, images, links,
//!   quotes and spans contribute their inline content;
//! - footnotes contribute nothing.
//!
//! The text is then lowercased, spaces become hyphens, every character
//! outside `[a-z0-9_.-]` is dropped and everything before the first letter
//! is cut. An empty result becomes `section`.
//!
//! Bold, underlined and superscript runs are not renderable and make the
//! derivation fail with [`EuldocError::MalformedAst`].

use std::sync::LazyLock;

use euldoc_pandoc_types::Inline;
use regex::Regex;

use crate::{EuldocError, Result};

/// The identifier used when nothing usable is left of the text.
pub const FALLBACK_IDENTIFIER: &str = "section";

static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9_.\-]").expect("Invalid regex pattern for identifier characters")
});

/// Render `inlines` to the plain text an identifier is derived from.
pub fn plain_text(inlines: &[Inline]) -> Result<String> {
    let mut text = String::new();
    push_plain_text(inlines, &mut text)?;
    Ok(text)
}

fn push_plain_text(inlines: &[Inline], out: &mut String) -> Result<()> {
    for inline in inlines {
        match inline {
            Inline::Str(s) => out.push_str(&s.text),
            Inline::Space(_) | Inline::SoftBreak(_) | Inline::LineBreak(_) => out.push(' '),
            Inline::Emph(i) => push_plain_text(&i.content, out)?,
            Inline::Strikeout(i) => push_plain_text(&i.content, out)?,
            Inline::Subscript(i) => push_plain_text(&i.content, out)?,
            Inline::SmallCaps(i) => push_plain_text(&i.content, out)?,
            Inline::Cite(i) => push_plain_text(&i.content, out)?,
            Inline::Image(i) => push_plain_text(&i.content, out)?,
            Inline::Link(i) => push_plain_text(&i.content, out)?,
            Inline::Quoted(i) => push_plain_text(&i.content, out)?,
            Inline::Span(i) => push_plain_text(&i.content, out)?,
            Inline::Code(c) => out.push_str(&c.text),
            Inline::Math(m) => out.push_str(&m.text),
            Inline::RawInline(r) => out.push_str(&r.text),
            Inline::Note(_) => {}
            Inline::Strong(_) | Inline::Underline(_) | Inline::Superscript(_) => {
                return Err(EuldocError::MalformedAst { tag: inline.tag() });
            }
        }
    }
    Ok(())
}

/// Normalize plain text into an identifier.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace(' ', "-");
    let kept = DISALLOWED_CHARS.replace_all(&lowered, "");
    match kept.find(|c: char| c.is_ascii_lowercase()) {
        Some(start) => kept[start..].to_string(),
        None => FALLBACK_IDENTIFIER.to_string(),
    }
}

/// Derive the identifier for a header with the given content.
pub fn derive_id(inlines: &[Inline]) -> Result<String> {
    Ok(slugify(&plain_text(inlines)?))
}
