use docfill::test_utils::fixtures::{
    build_container, document, entry_compression, paragraph, read_entry,
};
use predicates::prelude::*;

use crate::common::{TestWorkspace, row};

fn template(ws: &TestWorkspace) {
    let body = document(&[
        paragraph(&["Dear {cust", "omer.name},"]),
        format!("<w:tbl>{}{}{}</w:tbl>", row("{#lines}"), row("{item}"), row("{/lines}")),
    ]);
    build_container(
        &ws.file("template.docx"),
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", &body),
            ("word/footer1.xml", "<w:ftr><w:p><w:r><w:t>{ref}</w:t></w:r></w:p></w:ftr>"),
            ("word/styles.xml", "<w:styles>{customer.name}</w:styles>"),
        ],
    );
}

/// Body and footer are filled; other entries are left alone
#[test]
fn test_fill_docx() {
    let ws = TestWorkspace::new();
    template(&ws);
    ws.write(
        "data.yaml",
        "customer:\n  name: Ada\nref: INV-7\nlines:\n  - item: Tea\n  - item: Cake\n",
    );

    ws.docfill()
        .args(["fill", "template.docx", "--data", "data.yaml", "-o", "out.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filled 2 part(s)"))
        .stdout(predicate::str::contains("word/document.xml"))
        .stdout(predicate::str::contains("word/footer1.xml"));

    let out = ws.file("out.docx");
    let body = read_entry(&out, "word/document.xml");
    assert!(body.contains("Dear Ada</w:t>"));
    assert!(body.contains(&format!("<w:tbl>{}{}</w:tbl>", row("Tea"), row("Cake"))));
    assert!(!body.contains('{'));

    assert_eq!(
        read_entry(&out, "word/footer1.xml"),
        "<w:ftr><w:p><w:r><w:t>INV-7</w:t></w:r></w:p></w:ftr>"
    );
    assert_eq!(read_entry(&out, "word/styles.xml"), "<w:styles>{customer.name}</w:styles>");
    assert_eq!(read_entry(&out, "[Content_Types].xml"), "<Types/>");
}

/// Filled entries keep their compression method
#[test]
fn test_fill_preserves_compression() {
    let ws = TestWorkspace::new();
    template(&ws);
    ws.write("data.json", "{}");

    ws.docfill()
        .args(["fill", "template.docx", "-d", "data.json", "-o", "out.docx"])
        .assert()
        .success();

    for name in ["word/document.xml", "word/footer1.xml", "word/styles.xml"] {
        assert_eq!(
            entry_compression(&ws.file("out.docx"), name),
            entry_compression(&ws.file("template.docx"), name),
            "{name}"
        );
    }
}

/// `--heal-only` repairs markers in place without rendering them
#[test]
fn test_fill_heal_only_in_place() {
    let ws = TestWorkspace::new();
    template(&ws);

    ws.docfill()
        .args(["fill", "template.docx", "--heal-only", "-o", "template.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Healed 2 part(s)"));

    let body = read_entry(&ws.file("template.docx"), "word/document.xml");
    assert!(body.contains("Dear {customer.name}</w:t>"));
    assert!(body.contains("{#lines}"));
}

/// `--quiet` prints nothing on success
#[test]
fn test_fill_quiet() {
    let ws = TestWorkspace::new();
    template(&ws);
    ws.write("data.json", "{}");

    ws.docfill()
        .args(["-q", "fill", "template.docx", "-d", "data.json", "-o", "out.docx"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

/// Either `--data` or `--heal-only` is required
#[test]
fn test_fill_requires_data_or_heal_only() {
    let ws = TestWorkspace::new();
    template(&ws);

    ws.docfill()
        .args(["fill", "template.docx", "-o", "out.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--data"));
}
