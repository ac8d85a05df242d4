/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};

fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_euldoc"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn euldoc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait for euldoc")
}

fn document() -> Value {
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {"date": {"t": "MetaString", "c": "2020-01-01"}},
        "blocks": [
            {"t": "Header", "c": [1, ["", [], []], [{"t": "Str", "c": "Hello"}]]},
            {"t": "HorizontalRule"},
            {"t": "Para", "c": [{"t": "Str", "c": "World"}]}
        ]
    })
}

#[test]
fn html_from_stdin() {
    let output = run_with_stdin(&[], &document().to_string());
    assert!(output.status.success());

    let out: Value = serde_json::from_slice(&output.stdout).unwrap();
    let blocks = out["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0]["c"][1], json!(["hello", [], []]));
    assert_eq!(blocks[0]["c"][2][0]["t"], "Link");
    assert_eq!(blocks[1]["t"], "Header");
    assert_eq!(out["meta"]["date"], json!({"t": "MetaString", "c": "2020-01-01"}));
}

#[test]
fn pdf_between_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output_path = dir.path().join("out.json");
    std::fs::write(&input, document().to_string()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_euldoc"))
        .arg("--pdf")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output_path)
        .output()
        .expect("Failed to execute euldoc");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let out: Value = serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    let blocks = out["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["c"][1], json!(["", [], []]));
}

#[test]
fn invalid_json_fails_without_output() {
    let output = run_with_stdin(&[], "{not json");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to decode pandoc JSON"));
}

#[test]
fn failure_is_reported_once() {
    let output = run_with_stdin(&[], "[]");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to decode pandoc JSON").count(), 1);
    assert!(!stderr.contains("Error: "));
}

#[test]
fn pass_failure_writes_nothing() {
    let input = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [
            {"t": "Header", "c": [2, ["", [], []], [{"t": "Strong", "c": [{"t": "Str", "c": "x"}]}]]}
        ]
    });
    let output = run_with_stdin(&[], &input.to_string());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
