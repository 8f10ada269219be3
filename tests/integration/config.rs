use docfill::test_utils::fixtures::{build_container, read_entry};
use predicates::prelude::*;

use crate::common::TestWorkspace;

const SECTION: &str = "<w:body><w:p><w:r><w:t>{#gone}x{/gone}</w:t></w:r></w:p></w:body>";

/// Without configuration, empty paragraphs survive cleanup
#[test]
fn test_default_cleanup_keeps_paragraphs() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", SECTION);
    ws.write("data.json", "{}");

    ws.docfill()
        .args(["render", "document.xml", "--data", "data.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("<w:body><w:p></w:p></w:body>"));
}

/// `docfill.toml` in the working directory is picked up
#[test]
fn test_config_in_working_directory() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", SECTION);
    ws.write("data.json", "{}");
    ws.write("docfill.toml", "cleanup_tags = [\"w:r\", \"w:t\", \"w:p\"]\n");

    ws.docfill()
        .args(["render", "document.xml", "--data", "data.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("<w:body></w:body>"));
}

/// `DOCFILL_CONFIG` and `--config` select other files; `--config` wins
#[test]
fn test_config_env_and_flag() {
    let ws = TestWorkspace::new();
    build_container(&ws.file("doc.odt"), &[("content.xml", "<text:p>{title}</text:p>")]);
    ws.write("data.json", r#"{"title": "Minutes"}"#);
    ws.write("odt.toml", "parts = [\"content.xml\"]\n");
    ws.write("docx.toml", "parts = [\"word/*.xml\"]\n");

    ws.docfill()
        .env("DOCFILL_CONFIG", ws.file("odt.toml"))
        .args(["fill", "doc.odt", "-d", "data.json", "-o", "env.odt"])
        .assert()
        .success();
    assert_eq!(read_entry(&ws.file("env.odt"), "content.xml"), "<text:p>Minutes</text:p>");

    ws.docfill()
        .env("DOCFILL_CONFIG", ws.file("docx.toml"))
        .args(["--config", "odt.toml", "fill", "doc.odt", "-d", "data.json", "-o", "flag.odt"])
        .assert()
        .success();
    assert_eq!(read_entry(&ws.file("flag.odt"), "content.xml"), "<text:p>Minutes</text:p>");
}

/// Unknown keys are rejected with a hint
#[test]
fn test_invalid_config() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{a}</w:t>");
    ws.write("docfill.toml", "cleanup = [\"w:r\"]\n");

    ws.docfill()
        .args(["heal", "document.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("Known keys"));
}

/// An explicit config path must exist
#[test]
fn test_missing_explicit_config() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{a}</w:t>");

    ws.docfill()
        .args(["--config", "nowhere.toml", "heal", "document.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: nowhere.toml"));
}
