/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::{Attr, empty_attr};
use crate::block::Blocks;
use crate::node::{NodeId, NodeKey};

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Str(Str),
    Emph(Emph),
    Underline(Underline),
    Strong(Strong),
    Strikeout(Strikeout),
    Superscript(Superscript),
    Subscript(Subscript),
    SmallCaps(SmallCaps),
    Quoted(Quoted),
    Cite(Cite),
    Code(Code),
    Space(Space),
    SoftBreak(SoftBreak),
    LineBreak(LineBreak),
    Math(Math),
    RawInline(RawInline),
    Link(Link),
    Image(Image),
    Note(Note),
    Span(Span),
}

pub type Inlines = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum QuoteType {
    SingleQuote,
    DoubleQuote,
}

pub type Target = (String, String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MathType {
    InlineMath,
    DisplayMath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Str {
    pub text: String,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emph {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Underline {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strong {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strikeout {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Superscript {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscript {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmallCaps {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quoted {
    pub quote_type: QuoteType,
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cite {
    pub citations: Vec<Citation>,
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub attr: Attr,
    pub text: String,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Math {
    pub math_type: MathType,
    pub text: String,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawInline {
    pub format: String,
    pub text: String,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub attr: Attr,
    pub content: Inlines,
    pub target: Target,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub attr: Attr,
    pub content: Inlines,
    pub target: Target,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub content: Blocks,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub attr: Attr,
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Space {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineBreak {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoftBreak {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    pub id: String,
    pub prefix: Inlines,
    pub suffix: Inlines,
    pub mode: CitationMode,
    pub note_num: usize,
    pub hash: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationMode {
    AuthorInText,
    SuppressAuthor,
    NormalCitation,
}

pub trait AsInline {
    fn as_inline(self) -> Inline;
}

macro_rules! impl_as_inline {
    ($($type:ident),*) => {
        $(
            impl AsInline for $type {
                fn as_inline(self) -> Inline {
                    Inline::$type(self)
                }
            }
        )*
    };
}

impl AsInline for Inline {
    fn as_inline(self) -> Inline {
        self
    }
}

impl_as_inline!(
    Str,
    Emph,
    Underline,
    Strong,
    Strikeout,
    Superscript,
    Subscript,
    SmallCaps,
    Quoted,
    Cite,
    Code,
    Space,
    SoftBreak,
    LineBreak,
    Math,
    RawInline,
    Link,
    Image,
    Note,
    Span
);

impl Inline {
    pub fn node_id(&self) -> &NodeId {
        match self {
            Inline::Str(n) => &n.node_id,
            Inline::Emph(n) => &n.node_id,
            Inline::Underline(n) => &n.node_id,
            Inline::Strong(n) => &n.node_id,
            Inline::Strikeout(n) => &n.node_id,
            Inline::Superscript(n) => &n.node_id,
            Inline::Subscript(n) => &n.node_id,
            Inline::SmallCaps(n) => &n.node_id,
            Inline::Quoted(n) => &n.node_id,
            Inline::Cite(n) => &n.node_id,
            Inline::Code(n) => &n.node_id,
            Inline::Space(n) => &n.node_id,
            Inline::SoftBreak(n) => &n.node_id,
            Inline::LineBreak(n) => &n.node_id,
            Inline::Math(n) => &n.node_id,
            Inline::RawInline(n) => &n.node_id,
            Inline::Link(n) => &n.node_id,
            Inline::Image(n) => &n.node_id,
            Inline::Note(n) => &n.node_id,
            Inline::Span(n) => &n.node_id,
        }
    }

    pub fn key(&self) -> NodeKey {
        self.node_id().key()
    }

    /// The pandoc constructor name of this inline (`"Str"`, `"Space"`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Inline::Str(_) => "Str",
            Inline::Emph(_) => "Emph",
            Inline::Underline(_) => "Underline",
            Inline::Strong(_) => "Strong",
            Inline::Strikeout(_) => "Strikeout",
            Inline::Superscript(_) => "Superscript",
            Inline::Subscript(_) => "Subscript",
            Inline::SmallCaps(_) => "SmallCaps",
            Inline::Quoted(_) => "Quoted",
            Inline::Cite(_) => "Cite",
            Inline::Code(_) => "Code",
            Inline::Space(_) => "Space",
            Inline::SoftBreak(_) => "SoftBreak",
            Inline::LineBreak(_) => "LineBreak",
            Inline::Math(_) => "Math",
            Inline::RawInline(_) => "RawInline",
            Inline::Link(_) => "Link",
            Inline::Image(_) => "Image",
            Inline::Note(_) => "Note",
            Inline::Span(_) => "Span",
        }
    }

    pub fn str(text: impl Into<String>) -> Inline {
        Inline::Str(Str {
            text: text.into(),
            node_id: NodeId::fresh(),
        })
    }

    pub fn space() -> Inline {
        Inline::Space(Space::default())
    }

    pub fn raw(format: impl Into<String>, text: impl Into<String>) -> Inline {
        Inline::RawInline(RawInline {
            format: format.into(),
            text: text.into(),
            node_id: NodeId::fresh(),
        })
    }

    pub fn strong(content: Inlines) -> Inline {
        Inline::Strong(Strong {
            content,
            node_id: NodeId::fresh(),
        })
    }

    pub fn emph(content: Inlines) -> Inline {
        Inline::Emph(Emph {
            content,
            node_id: NodeId::fresh(),
        })
    }

    pub fn link(attr: Attr, content: Inlines, target: Target) -> Inline {
        Inline::Link(Link {
            attr,
            content,
            target,
            node_id: NodeId::fresh(),
        })
    }

    pub fn image(attr: Attr, content: Inlines, target: Target) -> Inline {
        Inline::Image(Image {
            attr,
            content,
            target,
            node_id: NodeId::fresh(),
        })
    }

    pub fn span(attr: Attr, content: Inlines) -> Inline {
        Inline::Span(Span {
            attr,
            content,
            node_id: NodeId::fresh(),
        })
    }

    /// A link with an empty attribute pointing at `url`.
    pub fn self_link(content: Inlines, url: impl Into<String>) -> Inline {
        Inline::link(empty_attr(), content, (url.into(), String::new()))
    }
}
