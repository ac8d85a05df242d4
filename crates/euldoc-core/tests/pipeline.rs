/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end runs of both modes over pandoc JSON documents.
 */

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use euldoc_core::{EuldocError, Mode, PipelineOptions, SystemRuntime, process};
use serde_json::{Value, json};

struct StubRuntime {
    files: Vec<PathBuf>,
}

impl SystemRuntime for StubRuntime {
    fn probe_file(&self, path: &Path) -> io::Result<()> {
        if self.files.iter().any(|f| f == path) {
            Ok(())
        } else {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }
}

fn runtime() -> StubRuntime {
    StubRuntime {
        files: vec![PathBuf::from("fig.svg")],
    }
}

fn str_(text: &str) -> Value {
    json!({"t": "Str", "c": text})
}

fn space() -> Value {
    json!({"t": "Space"})
}

fn attr(id: &str, classes: &[&str]) -> Value {
    json!([id, classes, []])
}

fn run(input: Value, mode: Mode) -> Result<Value, EuldocError> {
    let doc = euldoc_json::read_value(&input).unwrap();
    let options = PipelineOptions {
        mode,
        ..Default::default()
    };
    let out = process(doc, &options, &runtime())?;
    Ok(euldoc_json::to_value(&out))
}

fn sample() -> Value {
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {
            "title": {"t": "MetaInlines", "c": [str_("Notes")]}
        },
        "blocks": [
            {"t": "Para", "c": [str_("Intro")]},
            {"t": "HorizontalRule"},
            {"t": "Para", "c": [
                {"t": "Strong", "c": [str_("Setup")]},
                space(),
                str_("first"),
            ]},
            {"t": "Header", "c": [2, attr("", &[]), [str_("Setup")]]},
            {"t": "Para", "c": [
                {"t": "Image", "c": [attr("", &[]), [str_("plot")], ["fig.png", ""]]},
                space(),
                {"t": "Link", "c": [attr("", &["preview"]), [str_("demo")], ["demo.html", ""]]},
            ]},
            {"t": "Para", "c": [
                str_("a"),
                {"t": "RawInline", "c": ["tex", "\\hfill"]},
                str_("b"),
            ]},
        ]
    })
}

fn self_link(content: Value, url: &str) -> Value {
    json!({"t": "Link", "c": [attr("", &[]), content, [url, ""]]})
}

#[test]
fn html_mode_end_to_end() {
    let out = run(sample(), Mode::Html).unwrap();
    let blocks = out["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 7);

    // The rule became an empty header, which still gets an anchor.
    assert_eq!(
        blocks[1],
        json!({"t": "Header", "c": [3, attr("section", &[]), [self_link(json!([]), "#section")]]})
    );

    assert_eq!(
        blocks[2],
        json!({"t": "Header", "c": [3, attr("setup", &[]), [self_link(json!([str_("Setup")]), "#setup")]]})
    );
    assert_eq!(
        blocks[3],
        json!({"t": "Para", "c": [{"t": "RawInline", "c": ["html", "&zwnj;"]}, str_("first")]})
    );
    assert_eq!(blocks[4]["c"][1], attr("setup-1", &[]));

    assert_eq!(blocks[5]["c"][0]["c"][2], json!(["fig.svg", ""]));
    // Preview links are only unwrapped for PDF.
    assert_eq!(blocks[5]["c"][2]["t"], "Link");

    assert_eq!(
        blocks[6],
        json!({"t": "Para", "c": [
            str_("a"),
            {"t": "Span", "c": [
                ["", ["tombstone"], [["style", "float:right;"]]],
                [{"t": "RawInline", "c": ["html", "&zwnj;"]}, str_("b")],
            ]},
        ]})
    );

    assert_eq!(
        out["meta"]["title"],
        json!({"t": "MetaInlines", "c": [self_link(json!([str_("Notes")]), "#")]})
    );
    assert_eq!(
        out["meta"]["date"],
        json!({"t": "MetaInlines", "c": [str_("June"), space(), str_("1,"), space(), str_("2024")]})
    );
    assert_eq!(out["pandoc-api-version"], json!([1, 23, 1]));
}

#[test]
fn pdf_mode_end_to_end() {
    let out = run(sample(), Mode::Pdf).unwrap();
    let blocks = out["blocks"].as_array().unwrap();

    // Only the rule is gone; nothing is promoted or linked.
    assert_eq!(blocks.len(), 5);
    assert_eq!(blocks[0], json!({"t": "Para", "c": [str_("Intro")]}));
    assert_eq!(blocks[1]["c"][0]["t"], "Strong");
    assert_eq!(
        blocks[2],
        json!({"t": "Header", "c": [2, attr("", &[]), [str_("Setup")]]})
    );

    let para = blocks[3]["c"].as_array().unwrap();
    assert_eq!(para[0]["c"][2], json!(["fig.png", ""]));
    assert_eq!(para[2], str_("demo"));
    assert_eq!(para.len(), 3);

    assert_eq!(blocks[4]["c"][1]["t"], "RawInline");
    assert_eq!(out["meta"]["title"], json!({"t": "MetaInlines", "c": [str_("Notes")]}));
    assert_eq!(out["meta"]["date"]["c"][0], str_("June"));
}

#[test]
fn existing_date_survives_both_modes() {
    let mut input = sample();
    input["meta"]["date"] = json!({"t": "MetaString", "c": "2020-01-01"});
    for mode in [Mode::Html, Mode::Pdf] {
        let out = run(input.clone(), mode).unwrap();
        assert_eq!(
            out["meta"]["date"],
            json!({"t": "MetaString", "c": "2020-01-01"})
        );
    }
}

#[test]
fn malformed_header_fails_the_run() {
    let input = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [
            {"t": "Header", "c": [1, attr("", &[]), [{"t": "Superscript", "c": [str_("2")]}]]}
        ]
    });
    let err = run(input.clone(), Mode::Html).unwrap_err();
    assert!(matches!(err, EuldocError::MalformedAst { tag: "Superscript" }));

    // PDF never derives identifiers.
    assert!(run(input, Mode::Pdf).is_ok());
}
