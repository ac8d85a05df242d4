/*
 * meta.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::block::Blocks;
use crate::inline::Inlines;
use hashlink::LinkedHashMap;

// Pandoc's MetaValue notably does not support numbers or nulls, so we don't either
// https://pandoc.org/lua-filters.html#type-metavalue
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    MetaString(String),
    MetaBool(bool),
    MetaInlines(Inlines),
    MetaBlocks(Blocks),
    MetaList(Vec<MetaValue>),
    MetaMap(Meta),
}

impl Default for MetaValue {
    fn default() -> Self {
        MetaValue::MetaMap(LinkedHashMap::new())
    }
}

/// Document metadata. Keys iterate in insertion order.
pub type Meta = LinkedHashMap<String, MetaValue>;
