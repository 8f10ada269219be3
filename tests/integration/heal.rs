use predicates::prelude::*;

use crate::common::{TestWorkspace, plain_paragraph};

/// Healing a file prints the reassembled XML to stdout
#[test]
fn test_heal_file_to_stdout() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", &plain_paragraph(&["Dear {cust", "omer}, hello"]));

    ws.docfill()
        .args(["heal", "document.xml"])
        .assert()
        .success()
        .stdout(predicate::str::diff(plain_paragraph(&["Dear {customer}", ", hello"])));
}

/// `-` reads the part from stdin
#[test]
fn test_heal_from_stdin() {
    let ws = TestWorkspace::new();
    let xml = "<w:p><w:r><w:t>{#ite</w:t></w:r><w:proofErr w:type=\"spellStart\"/><w:r><w:t>ms}</w:t></w:r></w:p>";

    ws.docfill()
        .args(["heal", "-"])
        .write_stdin(xml)
        .assert()
        .success()
        .stdout(predicate::str::diff("<w:p><w:r><w:t>{#items}</w:t></w:r></w:p>"));
}

/// Healing twice gives the same result as healing once
#[test]
fn test_heal_output_file_is_idempotent() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", &plain_paragraph(&["{a", "}{b.", "c}", " tail"]));

    ws.docfill().args(["heal", "document.xml", "-o", "once.xml"]).assert().success();
    ws.docfill().args(["heal", "once.xml", "-o", "twice.xml"]).assert().success();

    let once = ws.read("once.xml");
    assert!(once.contains("{a}"));
    assert!(once.contains("{b.c}"));
    assert_eq!(once, ws.read("twice.xml"));
}

/// A part without fragmented markers is written back byte for byte
#[test]
fn test_heal_passthrough_preserves_bytes() {
    let ws = TestWorkspace::new();
    let xml = "<?xml version=\"1.0\"?>\n<w:p>\n  <w:r><w:t>{name}</w:t></w:r>\n  <w:r><w:t></w:t></w:r>\n</w:p>\n";
    ws.write("document.xml", xml);

    ws.docfill().args(["heal", "document.xml", "-o", "out.xml"]).assert().success();
    assert_eq!(ws.read("out.xml"), xml);
}

/// Verbose logging goes to stderr and leaves stdout clean
#[test]
fn test_heal_verbose_logs_to_stderr() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", &plain_paragraph(&["{na", "me}"]));

    ws.docfill()
        .args(["--verbose", "heal", "document.xml"])
        .assert()
        .success()
        .stdout(predicate::str::diff(plain_paragraph(&["{name}"])))
        .stderr(predicate::str::contains("Healing 1 fragmented marker(s)"));
}
