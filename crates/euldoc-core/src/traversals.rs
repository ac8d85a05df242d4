/*
 * traversals.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Generic walks over the document tree and identity-based parent lookup.
 */

//! Tree walking and parent location.
//!
//! [`NodeRef`] is a borrowed view of every walkable value in a document: the
//! document itself, metadata maps and values, block and inline sequences,
//! list items, definition items, citations, captions and the parts of a
//! table. Text and numbers are payload, never nodes.
//!
//! Children are produced in a fixed order, so a node can be addressed by the
//! list of child ordinals leading to it from the root (its *path*).
//! [`NodeMut`] mirrors [`NodeRef`] for mutation, and [`resolve_mut`] turns a
//! path back into a mutable view.
//!
//! Parent lookup is by identity: [`find_parent`] walks the whole tree looking
//! for the block or inline whose [`NodeKey`] matches, so structurally equal
//! siblings are never confused. Every lookup starts a fresh walk, which keeps
//! it correct after earlier lookups have mutated the tree.

use std::ops::ControlFlow;

use euldoc_pandoc_types::{
    Block, Blocks, Caption, Cell, Citation, DefinitionItem, Inline, Inlines, Meta, MetaValue,
    NodeKey, Pandoc, Row, TableBody, TableFoot, TableHead,
};

use crate::{EuldocError, Result};

/// A borrowed view of one walkable value.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Pandoc),
    Meta(&'a Meta),
    MetaValue(&'a MetaValue),
    MetaValues(&'a [MetaValue]),
    Blocks(&'a [Block]),
    BlockLists(&'a [Blocks]),
    Block(&'a Block),
    Inlines(&'a [Inline]),
    InlineLists(&'a [Inlines]),
    Inline(&'a Inline),
    Definitions(&'a [DefinitionItem]),
    Definition(&'a DefinitionItem),
    Citations(&'a [Citation]),
    Citation(&'a Citation),
    Caption(&'a Caption),
    TableHead(&'a TableHead),
    TableBodies(&'a [TableBody]),
    TableBody(&'a TableBody),
    TableFoot(&'a TableFoot),
    Rows(&'a [Row]),
    Row(&'a Row),
    Cells(&'a [Cell]),
    Cell(&'a Cell),
}

impl<'a> NodeRef<'a> {
    /// The identity of this node, for blocks and inlines.
    pub fn key(self) -> Option<NodeKey> {
        match self {
            NodeRef::Block(block) => Some(block.key()),
            NodeRef::Inline(inline) => Some(inline.key()),
            _ => None,
        }
    }

    pub fn as_block(self) -> Option<&'a Block> {
        match self {
            NodeRef::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_inline(self) -> Option<&'a Inline> {
        match self {
            NodeRef::Inline(inline) => Some(inline),
            _ => None,
        }
    }

    /// The direct children of this node, in path order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Document(doc) => vec![NodeRef::Meta(&doc.meta), NodeRef::Blocks(&doc.blocks)],
            NodeRef::Meta(meta) => meta.values().map(NodeRef::MetaValue).collect(),
            NodeRef::MetaValue(value) => match value {
                MetaValue::MetaInlines(inlines) => vec![NodeRef::Inlines(inlines)],
                MetaValue::MetaBlocks(blocks) => vec![NodeRef::Blocks(blocks)],
                MetaValue::MetaList(items) => vec![NodeRef::MetaValues(items)],
                MetaValue::MetaMap(map) => vec![NodeRef::Meta(map)],
                MetaValue::MetaString(_) | MetaValue::MetaBool(_) => vec![],
            },
            NodeRef::MetaValues(items) => items.iter().map(NodeRef::MetaValue).collect(),
            NodeRef::Blocks(blocks) => blocks.iter().map(NodeRef::Block).collect(),
            NodeRef::BlockLists(lists) => lists.iter().map(|b| NodeRef::Blocks(b)).collect(),
            NodeRef::Block(block) => block_children(block),
            NodeRef::Inlines(inlines) => inlines.iter().map(NodeRef::Inline).collect(),
            NodeRef::InlineLists(lines) => lines.iter().map(|l| NodeRef::Inlines(l)).collect(),
            NodeRef::Inline(inline) => inline_children(inline),
            NodeRef::Definitions(items) => items.iter().map(NodeRef::Definition).collect(),
            NodeRef::Definition((term, definitions)) => {
                vec![NodeRef::Inlines(term), NodeRef::BlockLists(definitions)]
            }
            NodeRef::Citations(citations) => citations.iter().map(NodeRef::Citation).collect(),
            NodeRef::Citation(citation) => vec![
                NodeRef::Inlines(&citation.prefix),
                NodeRef::Inlines(&citation.suffix),
            ],
            NodeRef::Caption(caption) => {
                let mut children = Vec::with_capacity(2);
                if let Some(short) = &caption.short {
                    children.push(NodeRef::Inlines(short));
                }
                children.push(NodeRef::Blocks(&caption.long));
                children
            }
            NodeRef::TableHead(head) => vec![NodeRef::Rows(&head.rows)],
            NodeRef::TableBodies(bodies) => bodies.iter().map(NodeRef::TableBody).collect(),
            NodeRef::TableBody(body) => vec![NodeRef::Rows(&body.head), NodeRef::Rows(&body.body)],
            NodeRef::TableFoot(foot) => vec![NodeRef::Rows(&foot.rows)],
            NodeRef::Rows(rows) => rows.iter().map(NodeRef::Row).collect(),
            NodeRef::Row(row) => vec![NodeRef::Cells(&row.cells)],
            NodeRef::Cells(cells) => cells.iter().map(NodeRef::Cell).collect(),
            NodeRef::Cell(cell) => vec![NodeRef::Blocks(&cell.content)],
        }
    }
}

fn block_children(block: &Block) -> Vec<NodeRef<'_>> {
    match block {
        Block::Plain(p) => vec![NodeRef::Inlines(&p.content)],
        Block::Paragraph(p) => vec![NodeRef::Inlines(&p.content)],
        Block::Header(h) => vec![NodeRef::Inlines(&h.content)],
        Block::LineBlock(l) => vec![NodeRef::InlineLists(&l.content)],
        Block::BlockQuote(q) => vec![NodeRef::Blocks(&q.content)],
        Block::Div(d) => vec![NodeRef::Blocks(&d.content)],
        Block::OrderedList(l) => vec![NodeRef::BlockLists(&l.content)],
        Block::BulletList(l) => vec![NodeRef::BlockLists(&l.content)],
        Block::DefinitionList(d) => vec![NodeRef::Definitions(&d.content)],
        Block::Table(t) => vec![
            NodeRef::Caption(&t.caption),
            NodeRef::TableHead(&t.head),
            NodeRef::TableBodies(&t.bodies),
            NodeRef::TableFoot(&t.foot),
        ],
        Block::Figure(f) => vec![NodeRef::Caption(&f.caption), NodeRef::Blocks(&f.content)],
        Block::CodeBlock(_) | Block::RawBlock(_) | Block::HorizontalRule(_) => vec![],
    }
}

fn inline_children(inline: &Inline) -> Vec<NodeRef<'_>> {
    match inline {
        Inline::Emph(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Underline(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Strong(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Strikeout(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Superscript(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Subscript(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::SmallCaps(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Quoted(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Span(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Link(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Image(i) => vec![NodeRef::Inlines(&i.content)],
        Inline::Cite(c) => vec![NodeRef::Citations(&c.citations), NodeRef::Inlines(&c.content)],
        Inline::Note(n) => vec![NodeRef::Blocks(&n.content)],
        Inline::Str(_)
        | Inline::Code(_)
        | Inline::Space(_)
        | Inline::SoftBreak(_)
        | Inline::LineBreak(_)
        | Inline::Math(_)
        | Inline::RawInline(_) => vec![],
    }
}

/// A mutable view of one walkable value. Sequences are exposed as the
/// owning `Vec` so passes can splice them.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Document(&'a mut Pandoc),
    Meta(&'a mut Meta),
    MetaValue(&'a mut MetaValue),
    MetaValues(&'a mut Vec<MetaValue>),
    Blocks(&'a mut Blocks),
    BlockLists(&'a mut Vec<Blocks>),
    Block(&'a mut Block),
    Inlines(&'a mut Inlines),
    InlineLists(&'a mut Vec<Inlines>),
    Inline(&'a mut Inline),
    Definitions(&'a mut Vec<DefinitionItem>),
    Definition(&'a mut DefinitionItem),
    Citations(&'a mut Vec<Citation>),
    Citation(&'a mut Citation),
    Caption(&'a mut Caption),
    TableHead(&'a mut TableHead),
    TableBodies(&'a mut Vec<TableBody>),
    TableBody(&'a mut TableBody),
    TableFoot(&'a mut TableFoot),
    Rows(&'a mut Vec<Row>),
    Row(&'a mut Row),
    Cells(&'a mut Vec<Cell>),
    Cell(&'a mut Cell),
}

fn only(index: usize, node: NodeMut<'_>) -> Option<NodeMut<'_>> {
    (index == 0).then_some(node)
}

impl<'a> NodeMut<'a> {
    /// Descend to the child at `index`, using the same ordering as
    /// [`NodeRef::children`].
    pub fn into_child(self, index: usize) -> Option<NodeMut<'a>> {
        match self {
            NodeMut::Document(doc) => match index {
                0 => Some(NodeMut::Meta(&mut doc.meta)),
                1 => Some(NodeMut::Blocks(&mut doc.blocks)),
                _ => None,
            },
            NodeMut::Meta(meta) => meta.values_mut().nth(index).map(NodeMut::MetaValue),
            NodeMut::MetaValue(value) => {
                let child = match value {
                    MetaValue::MetaInlines(inlines) => NodeMut::Inlines(inlines),
                    MetaValue::MetaBlocks(blocks) => NodeMut::Blocks(blocks),
                    MetaValue::MetaList(items) => NodeMut::MetaValues(items),
                    MetaValue::MetaMap(map) => NodeMut::Meta(map),
                    MetaValue::MetaString(_) | MetaValue::MetaBool(_) => return None,
                };
                only(index, child)
            }
            NodeMut::MetaValues(items) => items.get_mut(index).map(NodeMut::MetaValue),
            NodeMut::Blocks(blocks) => blocks.get_mut(index).map(NodeMut::Block),
            NodeMut::BlockLists(lists) => lists.get_mut(index).map(NodeMut::Blocks),
            NodeMut::Block(block) => block_child_mut(block, index),
            NodeMut::Inlines(inlines) => inlines.get_mut(index).map(NodeMut::Inline),
            NodeMut::InlineLists(lines) => lines.get_mut(index).map(NodeMut::Inlines),
            NodeMut::Inline(inline) => inline_child_mut(inline, index),
            NodeMut::Definitions(items) => items.get_mut(index).map(NodeMut::Definition),
            NodeMut::Definition((term, definitions)) => match index {
                0 => Some(NodeMut::Inlines(term)),
                1 => Some(NodeMut::BlockLists(definitions)),
                _ => None,
            },
            NodeMut::Citations(citations) => citations.get_mut(index).map(NodeMut::Citation),
            NodeMut::Citation(citation) => match index {
                0 => Some(NodeMut::Inlines(&mut citation.prefix)),
                1 => Some(NodeMut::Inlines(&mut citation.suffix)),
                _ => None,
            },
            NodeMut::Caption(Caption { short, long }) => match (short, index) {
                (Some(short), 0) => Some(NodeMut::Inlines(short)),
                (Some(_), 1) | (None, 0) => Some(NodeMut::Blocks(long)),
                _ => None,
            },
            NodeMut::TableHead(head) => only(index, NodeMut::Rows(&mut head.rows)),
            NodeMut::TableBodies(bodies) => bodies.get_mut(index).map(NodeMut::TableBody),
            NodeMut::TableBody(body) => match index {
                0 => Some(NodeMut::Rows(&mut body.head)),
                1 => Some(NodeMut::Rows(&mut body.body)),
                _ => None,
            },
            NodeMut::TableFoot(foot) => only(index, NodeMut::Rows(&mut foot.rows)),
            NodeMut::Rows(rows) => rows.get_mut(index).map(NodeMut::Row),
            NodeMut::Row(row) => only(index, NodeMut::Cells(&mut row.cells)),
            NodeMut::Cells(cells) => cells.get_mut(index).map(NodeMut::Cell),
            NodeMut::Cell(cell) => only(index, NodeMut::Blocks(&mut cell.content)),
        }
    }
}

fn block_child_mut(block: &mut Block, index: usize) -> Option<NodeMut<'_>> {
    match block {
        Block::Plain(p) => only(index, NodeMut::Inlines(&mut p.content)),
        Block::Paragraph(p) => only(index, NodeMut::Inlines(&mut p.content)),
        Block::Header(h) => only(index, NodeMut::Inlines(&mut h.content)),
        Block::LineBlock(l) => only(index, NodeMut::InlineLists(&mut l.content)),
        Block::BlockQuote(q) => only(index, NodeMut::Blocks(&mut q.content)),
        Block::Div(d) => only(index, NodeMut::Blocks(&mut d.content)),
        Block::OrderedList(l) => only(index, NodeMut::BlockLists(&mut l.content)),
        Block::BulletList(l) => only(index, NodeMut::BlockLists(&mut l.content)),
        Block::DefinitionList(d) => only(index, NodeMut::Definitions(&mut d.content)),
        Block::Table(t) => match index {
            0 => Some(NodeMut::Caption(&mut t.caption)),
            1 => Some(NodeMut::TableHead(&mut t.head)),
            2 => Some(NodeMut::TableBodies(&mut t.bodies)),
            3 => Some(NodeMut::TableFoot(&mut t.foot)),
            _ => None,
        },
        Block::Figure(f) => match index {
            0 => Some(NodeMut::Caption(&mut f.caption)),
            1 => Some(NodeMut::Blocks(&mut f.content)),
            _ => None,
        },
        Block::CodeBlock(_) | Block::RawBlock(_) | Block::HorizontalRule(_) => None,
    }
}

fn inline_child_mut(inline: &mut Inline, index: usize) -> Option<NodeMut<'_>> {
    let content = match inline {
        Inline::Emph(i) => &mut i.content,
        Inline::Underline(i) => &mut i.content,
        Inline::Strong(i) => &mut i.content,
        Inline::Strikeout(i) => &mut i.content,
        Inline::Superscript(i) => &mut i.content,
        Inline::Subscript(i) => &mut i.content,
        Inline::SmallCaps(i) => &mut i.content,
        Inline::Quoted(i) => &mut i.content,
        Inline::Span(i) => &mut i.content,
        Inline::Link(i) => &mut i.content,
        Inline::Image(i) => &mut i.content,
        Inline::Cite(c) => {
            return match index {
                0 => Some(NodeMut::Citations(&mut c.citations)),
                1 => Some(NodeMut::Inlines(&mut c.content)),
                _ => None,
            };
        }
        Inline::Note(n) => return only(index, NodeMut::Blocks(&mut n.content)),
        Inline::Str(_)
        | Inline::Code(_)
        | Inline::Space(_)
        | Inline::SoftBreak(_)
        | Inline::LineBreak(_)
        | Inline::Math(_)
        | Inline::RawInline(_) => return None,
    };
    only(index, NodeMut::Inlines(content))
}

/// Lazy pre-order iterator over a subtree, root first.
pub struct Descendants<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

pub fn descendants(root: NodeRef<'_>) -> Descendants<'_> {
    Descendants { stack: vec![root] }
}

/// Callbacks for [`walk`].
///
/// For every node, `visit` is called first (in pre-order, with the node's
/// path from the walk root), then `enter`, then the node's children are
/// walked, then `exit`. Returning `Break` from `visit` stops the walk;
/// `exit` still fires for every node that was entered.
pub trait Visitor<'a> {
    fn visit(&mut self, node: NodeRef<'a>, path: &[usize]) -> ControlFlow<()>;

    fn enter(&mut self, _node: NodeRef<'a>) {}

    fn exit(&mut self, _node: NodeRef<'a>) {}
}

pub fn walk<'a, V: Visitor<'a> + ?Sized>(root: NodeRef<'a>, visitor: &mut V) -> ControlFlow<()> {
    let mut path = Vec::new();
    walk_node(root, visitor, &mut path)
}

fn walk_node<'a, V: Visitor<'a> + ?Sized>(
    node: NodeRef<'a>,
    visitor: &mut V,
    path: &mut Vec<usize>,
) -> ControlFlow<()> {
    visitor.visit(node, path)?;
    visitor.enter(node);
    let mut flow = ControlFlow::Continue(());
    for (index, child) in node.children().into_iter().enumerate() {
        path.push(index);
        flow = walk_node(child, visitor, path);
        path.pop();
        if flow.is_break() {
            break;
        }
    }
    visitor.exit(node);
    flow
}

struct PathFinder {
    key: NodeKey,
    found: Option<Vec<usize>>,
}

impl<'a> Visitor<'a> for PathFinder {
    fn visit(&mut self, node: NodeRef<'a>, path: &[usize]) -> ControlFlow<()> {
        if node.key() == Some(self.key) {
            self.found = Some(path.to_vec());
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// The path from `root` to the block or inline identified by `key`.
pub fn find_path(root: NodeRef<'_>, key: NodeKey) -> Option<Vec<usize>> {
    let mut finder = PathFinder { key, found: None };
    let _ = walk(root, &mut finder);
    finder.found
}

/// The path of the container that directly holds the node identified by
/// `key`. `None` when the node is not in the tree or is `root` itself.
pub fn find_parent(root: NodeRef<'_>, key: NodeKey) -> Option<Vec<usize>> {
    let mut path = find_path(root, key)?;
    path.pop()?;
    Some(path)
}

pub fn resolve_mut<'a>(root: NodeMut<'a>, path: &[usize]) -> Option<NodeMut<'a>> {
    path.iter()
        .try_fold(root, |node, &index| node.into_child(index))
}

/// The block list holding the block identified by `key`, and its position
/// in that list.
pub fn locate_block_mut(doc: &mut Pandoc, key: NodeKey) -> Result<(&mut Blocks, usize)> {
    let missing = || EuldocError::missing_parent(key, "block list");
    let path = find_parent(NodeRef::Document(doc), key).ok_or_else(missing)?;
    match resolve_mut(NodeMut::Document(doc), &path) {
        Some(NodeMut::Blocks(blocks)) => {
            let index = blocks
                .iter()
                .position(|block| block.key() == key)
                .ok_or_else(missing)?;
            Ok((blocks, index))
        }
        _ => Err(missing()),
    }
}

/// The inline sequence holding the inline identified by `key`, and its
/// position in that sequence.
pub fn locate_inline_mut(doc: &mut Pandoc, key: NodeKey) -> Result<(&mut Inlines, usize)> {
    let missing = || EuldocError::missing_parent(key, "inline sequence");
    let path = find_parent(NodeRef::Document(doc), key).ok_or_else(missing)?;
    match resolve_mut(NodeMut::Document(doc), &path) {
        Some(NodeMut::Inlines(inlines)) => {
            let index = inlines
                .iter()
                .position(|inline| inline.key() == key)
                .ok_or_else(missing)?;
            Ok((inlines, index))
        }
        _ => Err(missing()),
    }
}

/// Keys of every block in the document matching `pred`, in document order.
pub fn block_keys(doc: &Pandoc, pred: impl Fn(&Block) -> bool) -> Vec<NodeKey> {
    descendants(NodeRef::Document(doc))
        .filter_map(NodeRef::as_block)
        .filter(|block| pred(block))
        .map(Block::key)
        .collect()
}

/// Keys of every inline in the document matching `pred`, in document order.
pub fn inline_keys(doc: &Pandoc, pred: impl Fn(&Inline) -> bool) -> Vec<NodeKey> {
    descendants(NodeRef::Document(doc))
        .filter_map(NodeRef::as_inline)
        .filter(|inline| pred(inline))
        .map(Inline::key)
        .collect()
}
