/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::{Attr, empty_attr};
use crate::caption::Caption;
use crate::inline::Inlines;
use crate::list::ListAttributes;
use crate::node::{NodeId, NodeKey};
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Plain(Plain),
    Paragraph(Paragraph),
    LineBlock(LineBlock),
    CodeBlock(CodeBlock),
    RawBlock(RawBlock),
    BlockQuote(BlockQuote),
    OrderedList(OrderedList),
    BulletList(BulletList),
    DefinitionList(DefinitionList),
    Header(Header),
    HorizontalRule(HorizontalRule),
    Table(Table),
    Figure(Figure),
    Div(Div),
}

pub type Blocks = Vec<Block>;

/// A definition list entry: the term and its definitions.
pub type DefinitionItem = (Inlines, Vec<Blocks>);

#[derive(Debug, Clone, PartialEq)]
pub struct Plain {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineBlock {
    pub content: Vec<Inlines>,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub attr: Attr,
    pub text: String,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub format: String,
    pub text: String,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockQuote {
    pub content: Blocks,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList {
    pub attr: ListAttributes,
    pub content: Vec<Blocks>,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletList {
    pub content: Vec<Blocks>,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionList {
    pub content: Vec<DefinitionItem>,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub level: usize,
    pub attr: Attr,
    pub content: Inlines,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HorizontalRule {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub attr: Attr,
    pub caption: Caption,
    pub content: Blocks,
    pub node_id: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Div {
    pub attr: Attr,
    pub content: Blocks,
    pub node_id: NodeId,
}

pub trait AsBlock {
    fn as_block(self) -> Block;
}

macro_rules! impl_as_block {
    ($($type:ident),*) => {
        $(
            impl AsBlock for $type {
                fn as_block(self) -> Block {
                    Block::$type(self)
                }
            }
        )*
    };
}

impl AsBlock for Block {
    fn as_block(self) -> Block {
        self
    }
}

impl_as_block!(
    Plain,
    Paragraph,
    LineBlock,
    CodeBlock,
    RawBlock,
    BlockQuote,
    OrderedList,
    BulletList,
    DefinitionList,
    Header,
    HorizontalRule,
    Table,
    Figure,
    Div
);

impl Block {
    pub fn node_id(&self) -> &NodeId {
        match self {
            Block::Plain(n) => &n.node_id,
            Block::Paragraph(n) => &n.node_id,
            Block::LineBlock(n) => &n.node_id,
            Block::CodeBlock(n) => &n.node_id,
            Block::RawBlock(n) => &n.node_id,
            Block::BlockQuote(n) => &n.node_id,
            Block::OrderedList(n) => &n.node_id,
            Block::BulletList(n) => &n.node_id,
            Block::DefinitionList(n) => &n.node_id,
            Block::Header(n) => &n.node_id,
            Block::HorizontalRule(n) => &n.node_id,
            Block::Table(n) => &n.node_id,
            Block::Figure(n) => &n.node_id,
            Block::Div(n) => &n.node_id,
        }
    }

    pub fn key(&self) -> NodeKey {
        self.node_id().key()
    }

    /// The pandoc constructor name of this block (`"Para"`, `"Header"`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Block::Plain(_) => "Plain",
            Block::Paragraph(_) => "Para",
            Block::LineBlock(_) => "LineBlock",
            Block::CodeBlock(_) => "CodeBlock",
            Block::RawBlock(_) => "RawBlock",
            Block::BlockQuote(_) => "BlockQuote",
            Block::OrderedList(_) => "OrderedList",
            Block::BulletList(_) => "BulletList",
            Block::DefinitionList(_) => "DefinitionList",
            Block::Header(_) => "Header",
            Block::HorizontalRule(_) => "HorizontalRule",
            Block::Table(_) => "Table",
            Block::Figure(_) => "Figure",
            Block::Div(_) => "Div",
        }
    }

    /// True for the blocks whose items nest other blocks as list entries.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Block::OrderedList(_) | Block::BulletList(_) | Block::DefinitionList(_)
        )
    }

    pub fn para(content: Inlines) -> Block {
        Block::Paragraph(Paragraph {
            content,
            node_id: NodeId::fresh(),
        })
    }

    pub fn plain(content: Inlines) -> Block {
        Block::Plain(Plain {
            content,
            node_id: NodeId::fresh(),
        })
    }

    pub fn header(level: usize, attr: Attr, content: Inlines) -> Block {
        Block::Header(Header {
            level,
            attr,
            content,
            node_id: NodeId::fresh(),
        })
    }

    /// A header with an empty attribute and no content.
    pub fn empty_header(level: usize) -> Block {
        Block::header(level, empty_attr(), vec![])
    }

    pub fn horizontal_rule() -> Block {
        Block::HorizontalRule(HorizontalRule::default())
    }

    pub fn bullet_list(content: Vec<Blocks>) -> Block {
        Block::BulletList(BulletList {
            content,
            node_id: NodeId::fresh(),
        })
    }

    pub fn div(attr: Attr, content: Blocks) -> Block {
        Block::Div(Div {
            attr,
            content,
            node_id: NodeId::fresh(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::Inline;

    #[test]
    fn test_equal_rules_are_distinct_instances() {
        let a = Block::horizontal_rule();
        let b = Block::horizontal_rule();
        assert_eq!(a, b);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_is_list() {
        assert!(Block::bullet_list(vec![]).is_list());
        assert!(!Block::para(vec![Inline::str("x")]).is_list());
        assert!(!Block::div(empty_attr(), vec![]).is_list());
    }

    #[test]
    fn test_paragraph_tag_is_para() {
        assert_eq!(Block::para(vec![]).tag(), "Para");
        assert_eq!(Block::empty_header(3).tag(), "Header");
    }

    #[test]
    fn test_empty_header() {
        let Block::Header(header) = Block::empty_header(3) else {
            panic!("Expected Header");
        };
        assert_eq!(header.level, 3);
        assert!(header.content.is_empty());
        assert!(crate::attr::is_empty_attr(&header.attr));
    }
}
