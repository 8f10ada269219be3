use predicates::prelude::*;
use serde_json::Value;

use crate::common::{TestWorkspace, plain_paragraph};

fn template(ws: &TestWorkspace) {
    ws.write(
        "document.xml",
        &plain_paragraph(&["{#items}{na", "me}{/items} for {customer.nmae}"]),
    );
}

/// Text listing shows each marker and flags the fragmented ones
#[test]
fn test_markers_text_listing() {
    let ws = TestWorkspace::new();
    template(&ws);

    ws.docfill()
        .args(["markers", "document.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{#items}"))
        .stdout(predicate::str::contains("section open"))
        .stdout(predicate::str::contains("fragmented"))
        .stdout(predicate::str::contains("4 marker(s), 1 fragmented"));
}

/// JSON output is one object; `unresolved` only appears with data
#[test]
fn test_markers_json() {
    let ws = TestWorkspace::new();
    template(&ws);

    let assert = ws.docfill().args(["markers", "document.xml", "--format", "json"]).assert().success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    let markers = report["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 4);
    assert_eq!(markers[0]["kind"], "section_open");
    assert_eq!(markers[1]["path"], "name");
    assert_eq!(markers[1]["fragmented"], true);
    assert_eq!(markers[2]["kind"], "section_close");
    assert!(report.get("unresolved").is_none());
}

/// Paths missing from the data are reported with close matches
#[test]
fn test_markers_with_data_suggests_keys() {
    let ws = TestWorkspace::new();
    template(&ws);
    ws.write("data.json", r#"{"items": [{"name": "Tea"}], "customer": {"name": "Ada"}}"#);

    ws.docfill()
        .args(["markers", "document.xml", "--data", "data.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "customer.nmae is not in the data (did you mean customer.name",
        ))
        .stdout(predicate::str::contains("items is not in the data").not());
}

/// `--strict` turns missing paths into a failure
#[test]
fn test_markers_strict() {
    let ws = TestWorkspace::new();
    template(&ws);
    ws.write("data.json", r#"{"items": []}"#);

    ws.docfill()
        .args(["markers", "document.xml", "--data", "data.json", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 marker path(s) are not provided by the data"));

    ws.write("complete.json", r#"{"items": [{"name": "Tea"}], "customer": {"nmae": "x"}}"#);
    ws.docfill()
        .args(["markers", "document.xml", "--data", "complete.json", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All marker paths resolve"));
}
