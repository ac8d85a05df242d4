/*
 * attr.rs
 * Copyright (c) 2025 Posit, PBC
 */

/// Pandoc's `(identifier, classes, key-value pairs)` triple.
///
/// Key-value pairs are kept as an ordered list: pandoc allows repeated keys
/// and their order is significant for writers.
pub type Attr = (String, Vec<String>, Vec<(String, String)>);

pub fn empty_attr() -> Attr {
    (String::new(), vec![], vec![])
}

pub fn is_empty_attr(attr: &Attr) -> bool {
    attr.0.is_empty() && attr.1.is_empty() && attr.2.is_empty()
}

pub fn has_class(attr: &Attr, class: &str) -> bool {
    attr.1.iter().any(|c| c == class)
}
