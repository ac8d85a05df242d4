/*
 * auto_identifiers.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that assigns unique header identifiers.
 */

use std::collections::{HashMap, HashSet};

use euldoc_pandoc_types::{Block, Pandoc};

use crate::Result;
use crate::identifiers::derive_id;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::block_keys;

use super::header_mut;

/// Gives every header an identifier and makes repeated identifiers unique.
///
/// Headers without an identifier get one derived from their text. Then, in
/// document order, the second and later headers sharing an identifier get
/// the lowest of `-1`, `-2`, ... that no other header uses. Headers that
/// already carry an identifier are never re-derived, and the identifiers
/// left behind are unique, so running the pass twice changes nothing.
pub struct AutoIdentifierTransform;

impl AutoIdentifierTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AutoIdentifierTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for AutoIdentifierTransform {
    fn name(&self) -> &str {
        "auto-identifiers"
    }

    fn transform(&self, ast: &mut Pandoc, _ctx: &mut TransformContext) -> Result<()> {
        let headers = block_keys(ast, |block| matches!(block, Block::Header(_)));

        let mut derived = 0;
        let mut taken: HashSet<String> = HashSet::new();
        for key in &headers {
            let header = header_mut(ast, *key)?;
            if header.attr.0.is_empty() {
                header.attr.0 = derive_id(&header.content)?;
                derived += 1;
            }
            taken.insert(header.attr.0.clone());
        }

        // Next suffix to try for each identifier; 0 until it is first seen.
        let mut next_suffix: HashMap<String, usize> = HashMap::new();
        let mut renamed = 0;
        for key in &headers {
            let header = header_mut(ast, *key)?;
            let suffix = next_suffix.entry(header.attr.0.clone()).or_insert(0);
            if *suffix == 0 {
                *suffix = 1;
                continue;
            }
            let mut candidate = format!("{}-{}", header.attr.0, suffix);
            while taken.contains(&candidate) {
                *suffix += 1;
                candidate = format!("{}-{}", header.attr.0, suffix);
            }
            *suffix += 1;
            taken.insert(candidate.clone());
            header.attr.0 = candidate;
            renamed += 1;
        }

        tracing::debug!(
            headers = headers.len(),
            derived,
            renamed,
            "Assigned header identifiers"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuldocError;
    use crate::runtime::FixedRuntime;
    use euldoc_pandoc_types::{Inline, Meta, MetaValue, empty_attr};

    fn header(id: &str, text: &str) -> Block {
        Block::header(
            2,
            (id.to_string(), vec![], vec![]),
            vec![Inline::str(text)],
        )
    }

    fn ids(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Header(h) => Some(h.attr.0.clone()),
                _ => None,
            })
            .collect()
    }

    fn run(ast: &mut Pandoc) -> Result<()> {
        let runtime = FixedRuntime::new(2024, 1, 1);
        AutoIdentifierTransform::new().transform(ast, &mut TransformContext::new(&runtime))
    }

    #[test]
    fn test_transform_name() {
        assert_eq!(AutoIdentifierTransform::new().name(), "auto-identifiers");
    }

    #[test]
    fn test_derives_missing_identifiers() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![
                Block::header(
                    1,
                    empty_attr(),
                    vec![Inline::str("Getting"), Inline::space(), Inline::str("Started")],
                ),
                header("custom", "Whatever"),
            ],
        );
        run(&mut ast).unwrap();
        assert_eq!(ids(&ast.blocks), vec!["getting-started", "custom"]);
    }

    #[test]
    fn test_duplicates_are_numbered_in_document_order() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![header("", "Intro"), header("", "Intro"), header("", "Intro")],
        );
        run(&mut ast).unwrap();
        assert_eq!(ids(&ast.blocks), vec!["intro", "intro-1", "intro-2"]);
    }

    #[test]
    fn test_explicit_identifiers_take_part_in_deduplication() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![header("intro", "Anything"), header("", "Intro")],
        );
        run(&mut ast).unwrap();
        assert_eq!(ids(&ast.blocks), vec!["intro", "intro-1"]);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![header("", "A"), header("", "A"), header("", "B")],
        );
        run(&mut ast).unwrap();
        let first = ids(&ast.blocks);
        run(&mut ast).unwrap();
        assert_eq!(ids(&ast.blocks), first);
        assert_eq!(first, vec!["a", "a-1", "b"]);
    }

    #[test]
    fn test_suffix_skips_identifiers_already_in_use() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![
                header("", "Intro"),
                header("", "Intro"),
                Block::header(
                    2,
                    empty_attr(),
                    vec![Inline::str("Intro"), Inline::space(), Inline::str("1")],
                ),
            ],
        );
        run(&mut ast).unwrap();
        let first = ids(&ast.blocks);
        assert_eq!(first, vec!["intro", "intro-2", "intro-1"]);

        let unique: HashSet<&String> = first.iter().collect();
        assert_eq!(unique.len(), first.len());

        run(&mut ast).unwrap();
        assert_eq!(ids(&ast.blocks), first);
    }

    #[test]
    fn test_suffixes_assigned_earlier_are_not_reused() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![
                header("a", "x"),
                header("a", "x"),
                header("a-1", "x"),
                header("a", "x"),
                header("a-1", "x"),
            ],
        );
        run(&mut ast).unwrap();
        let first = ids(&ast.blocks);
        assert_eq!(first, vec!["a", "a-2", "a-1", "a-3", "a-1-1"]);
        run(&mut ast).unwrap();
        assert_eq!(ids(&ast.blocks), first);
    }

    #[test]
    fn test_headers_in_metadata_blocks_are_included() {
        let mut meta = Meta::new();
        meta.insert(
            "abstract".to_string(),
            MetaValue::MetaBlocks(vec![header("", "Intro")]),
        );
        let mut ast = Pandoc::new(meta, vec![header("", "Intro")]);
        run(&mut ast).unwrap();
        let MetaValue::MetaBlocks(abstract_blocks) = &ast.meta["abstract"] else {
            panic!("Expected MetaBlocks");
        };
        assert_eq!(ids(abstract_blocks), vec!["intro"]);
        assert_eq!(ids(&ast.blocks), vec!["intro-1"]);
    }

    #[test]
    fn test_bold_header_text_is_malformed() {
        let mut ast = Pandoc::new(
            Meta::new(),
            vec![Block::header(
                2,
                empty_attr(),
                vec![Inline::strong(vec![Inline::str("Bold")])],
            )],
        );
        let err = run(&mut ast).unwrap_err();
        assert!(matches!(err, EuldocError::MalformedAst { tag: "Strong" }));
    }
}
