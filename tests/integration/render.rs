use predicates::prelude::*;

use crate::common::{TestWorkspace, plain_paragraph, row};

/// A section around whole table rows repeats the rows
#[test]
fn test_render_table_row_loop_from_json() {
    let ws = TestWorkspace::new();
    let xml = format!("<w:tbl>{}{}{}</w:tbl>", row("{#rows}"), row("{name}: {qty}"), row("{/rows}"));
    ws.write("table.xml", &xml);
    ws.write(
        "data.json",
        r#"{"rows": [{"name": "Widget", "qty": 2}, {"name": "Gadget", "qty": 1.5}]}"#,
    );

    ws.docfill()
        .args(["render", "table.xml", "--data", "data.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "<w:tbl>{}{}</w:tbl>",
            row("Widget: 2"),
            row("Gadget: 1.5")
        )));
}

/// Fragmented markers are healed before rendering
#[test]
fn test_render_heals_first() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", &plain_paragraph(&["Hi {na", "me}"]));
    ws.write("data.yaml", "name: Ada\n");

    ws.docfill()
        .args(["render", "document.xml", "-d", "data.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::diff(plain_paragraph(&["Hi Ada"])));
}

/// With `--no-heal`, fragmented markers stay literal
#[test]
fn test_render_no_heal_leaves_fragments() {
    let ws = TestWorkspace::new();
    let xml = plain_paragraph(&["Hi {na", "me}"]);
    ws.write("document.xml", &xml);
    ws.write("data.yaml", "name: Ada\n");

    ws.docfill()
        .args(["render", "document.xml", "-d", "data.yaml", "--no-heal"])
        .assert()
        .success()
        .stdout(predicate::str::diff(xml));
}

/// Data can be piped in when its format is given
#[test]
fn test_render_data_from_stdin() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{#paid}Paid{/paid}{#due}Due {due}{/due}</w:t>");

    ws.docfill()
        .args(["render", "document.xml", "--data", "-", "--data-format", "yaml"])
        .write_stdin("paid: false\ndue: 30\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("<w:t>Due 30</w:t>"));
}

/// TOML data, values escaped, result written to a file
#[test]
fn test_render_toml_to_output_file() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", "<w:t>{company.name} ({company.since})</w:t>");
    ws.write("data.toml", "[company]\nname = \"Smith & <Sons>\"\nsince = 1999-01-01\n");

    ws.docfill()
        .args(["render", "document.xml", "--data", "data.toml", "-o", "out.xml"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(ws.read("out.xml"), "<w:t>Smith &amp; &lt;Sons&gt; (1999-01-01)</w:t>");
}

/// Missing values render empty and the emptied wrappers are removed
#[test]
fn test_render_missing_value_collapses_run() {
    let ws = TestWorkspace::new();
    ws.write("document.xml", &plain_paragraph(&["Name:", "{missing}"]));
    ws.write("data.json", "{}");

    ws.docfill()
        .args(["render", "document.xml", "--data", "data.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff(plain_paragraph(&["Name:"])));
}
