/*
 * pandoc_json.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Documents shaped like real pandoc output pass through unchanged.
 */

use euldoc_pandoc_types::{Block, Inline, MetaValue};
use proptest::prelude::*;
use serde_json::{Value, json};

fn str_(text: &str) -> Value {
    json!({"t": "Str", "c": text})
}

fn no_attr() -> Value {
    json!(["", [], []])
}

/// What `pandoc -t json` produces for a small article with a table, a
/// figure, a citation and a footnote.
fn article() -> Value {
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {
            "author": {"t": "MetaList", "c": [
                {"t": "MetaInlines", "c": [str_("Ada")]}
            ]},
            "draft": {"t": "MetaBool", "c": true},
            "params": {"t": "MetaMap", "c": {
                "seed": {"t": "MetaString", "c": "42"}
            }},
            "title": {"t": "MetaInlines", "c": [str_("Results")]}
        },
        "blocks": [
            {"t": "Header", "c": [1, ["results", ["unnumbered"], [["lang", "en"]]], [str_("Results")]]},
            {"t": "Para", "c": [
                {"t": "Quoted", "c": [{"t": "DoubleQuote"}, [str_("fast")]]},
                {"t": "Space"},
                {"t": "Math", "c": [{"t": "InlineMath"}, "e^{i\\pi}"]},
                {"t": "SoftBreak"},
                {"t": "Cite", "c": [
                    [{
                        "citationId": "knuth84",
                        "citationPrefix": [str_("see")],
                        "citationSuffix": [],
                        "citationMode": {"t": "NormalCitation"},
                        "citationNoteNum": 1,
                        "citationHash": 0
                    }],
                    [str_("[see"), {"t": "Space"}, str_("@knuth84]")]
                ]},
                {"t": "Note", "c": [{"t": "Para", "c": [str_("Footnote.")]}]}
            ]},
            {"t": "OrderedList", "c": [
                [3, {"t": "LowerRoman"}, {"t": "OneParen"}],
                [[{"t": "Plain", "c": [str_("iii")]}]]
            ]},
            {"t": "DefinitionList", "c": [
                [[str_("Term")], [[{"t": "Plain", "c": [str_("Meaning")]}]]]
            ]},
            {"t": "LineBlock", "c": [[str_("one")], [str_("two")]]},
            {"t": "Figure", "c": [
                ["fig-plot", [], []],
                [null, [{"t": "Plain", "c": [str_("A"), {"t": "Space"}, str_("plot")]}]],
                [{"t": "Plain", "c": [
                    {"t": "Image", "c": [no_attr(), [str_("A plot")], ["plot.png", ""]]}
                ]}]
            ]},
            {"t": "Table", "c": [
                no_attr(),
                [null, []],
                [
                    [{"t": "AlignLeft"}, {"t": "ColWidthDefault"}],
                    [{"t": "AlignRight"}, {"t": "ColWidth", "c": 0.25}]
                ],
                [no_attr(), [[no_attr(), [
                    [no_attr(), {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [str_("Name")]}]],
                    [no_attr(), {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [str_("Score")]}]]
                ]]]],
                [[no_attr(), 0, [], [[no_attr(), [
                    [no_attr(), {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [str_("Ada")]}]],
                    [no_attr(), {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [str_("10")]}]]
                ]]]]],
                [no_attr(), []]
            ]},
            {"t": "RawBlock", "c": ["html", "<hr/>"]},
            {"t": "CodeBlock", "c": [["", ["rust"], []], "fn main() {}"]}
        ]
    })
}

#[test]
fn article_survives_read_and_write() {
    let input = article();
    let doc = euldoc_json::read_value(&input).unwrap();
    assert_eq!(euldoc_json::to_value(&doc), input);
}

#[test]
fn article_reads_into_the_expected_shape() {
    let doc = euldoc_json::read_value(&article()).unwrap();
    assert_eq!(doc.api_version, vec![1, 23, 1]);
    assert_eq!(doc.blocks.len(), 9);
    assert!(matches!(doc.blocks[5], Block::Figure(_)));
    assert!(matches!(doc.meta["draft"], MetaValue::MetaBool(true)));

    let Block::Header(header) = &doc.blocks[0] else {
        panic!("Expected Header");
    };
    assert_eq!(header.attr.0, "results");
    assert_eq!(header.attr.2, vec![("lang".to_string(), "en".to_string())]);
}

#[test]
fn writer_output_is_valid_json_text() {
    let doc = euldoc_json::read_value(&article()).unwrap();
    let mut buf = Vec::new();
    euldoc_json::write(&doc, &mut buf).unwrap();
    let reparsed: Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(reparsed, article());
}

proptest! {
    #[test]
    fn string_payloads_are_preserved(text in "\\PC*", format in "[a-z]{1,8}") {
        let input = json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {"note": {"t": "MetaString", "c": text}},
            "blocks": [{"t": "Para", "c": [
                str_(&text),
                {"t": "RawInline", "c": [format, text]}
            ]}]
        });
        let doc = euldoc_json::read_str(&input.to_string()).unwrap();
        let Block::Paragraph(para) = &doc.blocks[0] else {
            panic!("Expected Para");
        };
        prop_assert_eq!(&para.content[0], &Inline::str(text.clone()));
        prop_assert_eq!(euldoc_json::to_value(&doc), input);
    }
}
