use docfill::test_utils::fixtures::build_container;
use predicates::prelude::*;

use crate::common::TestWorkspace;

#[test]
fn test_missing_input() {
    let ws = TestWorkspace::new();

    ws.docfill()
        .args(["heal", "missing.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: File not found: missing.xml"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn test_unsupported_data_format() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{a}</w:t>");
    ws.write("data.csv", "a,b\n");

    ws.docfill()
        .args(["render", "document.xml", "--data", "data.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported data format for data.csv"))
        .stderr(predicate::str::contains(".json"));
}

#[test]
fn test_stdin_data_needs_format() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{a}</w:t>");

    ws.docfill()
        .args(["render", "document.xml", "--data", "-"])
        .write_stdin("a: 1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported data format for <stdin>"));
}

#[test]
fn test_both_inputs_from_stdin() {
    let ws = TestWorkspace::new();

    ws.docfill()
        .args(["render", "-", "--data", "-", "--data-format", "json"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only one of the input and --data"));
}

#[test]
fn test_data_root_must_be_mapping() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{a}</w:t>");
    ws.write("data.json", "[1, 2, 3]");

    ws.docfill()
        .args(["render", "document.xml", "--data", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template data in data.json"))
        .stderr(predicate::str::contains("a sequence"));
}

#[test]
fn test_container_is_not_a_zip() {
    let ws = TestWorkspace::new();
    ws.write("template.docx", "not a zip");
    ws.write("data.json", "{}");

    ws.docfill()
        .args(["fill", "template.docx", "-d", "data.json", "-o", "out.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package error in template.docx"));
    assert!(!ws.file("out.docx").exists());
}

#[test]
fn test_container_without_fillable_parts() {
    let ws = TestWorkspace::new();
    build_container(&ws.file("archive.zip"), &[("readme.txt", "{name}")]);

    ws.docfill()
        .args(["fill", "archive.zip", "--heal-only", "-o", "out.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No fillable parts found in archive.zip"))
        .stderr(predicate::str::contains("parts"));
}
