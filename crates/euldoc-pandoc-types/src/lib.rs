/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc AST type definitions for euldoc.
 *
 * This crate provides pure data type definitions for the Pandoc AST,
 * mirroring the types from pandoc-types in Haskell. Every block and
 * inline carries a `NodeId`, so two structurally equal nodes can still
 * be told apart by the filters that rewrite them.
 */

pub mod attr;
pub mod block;
pub mod caption;
pub mod inline;
pub mod list;
pub mod meta;
pub mod node;
pub mod pandoc;
pub mod table;

// Re-export commonly used types at the crate root
pub use attr::{Attr, empty_attr, has_class, is_empty_attr};
pub use block::{
    AsBlock, Block, BlockQuote, Blocks, BulletList, CodeBlock, DefinitionItem, DefinitionList, Div,
    Figure, Header, HorizontalRule, LineBlock, OrderedList, Paragraph, Plain, RawBlock,
};
pub use caption::Caption;
pub use inline::{
    AsInline, Citation, CitationMode, Cite, Code, Emph, Image, Inline, Inlines, LineBreak, Link,
    Math, MathType, Note, QuoteType, Quoted, RawInline, SmallCaps, SoftBreak, Space, Span, Str,
    Strikeout, Strong, Subscript, Superscript, Target, Underline,
};
pub use list::{ListAttributes, ListNumberDelim, ListNumberStyle};
pub use meta::{Meta, MetaValue};
pub use node::{NodeId, NodeKey};
pub use pandoc::{DEFAULT_API_VERSION, Pandoc};
pub use table::{Alignment, Cell, ColSpec, ColWidth, Row, Table, TableBody, TableFoot, TableHead};
