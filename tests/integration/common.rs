//! Shared helpers for the integration tests.

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory with helpers to run the binary in it.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` and return the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.file(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, content).expect("write file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).expect("read file")
    }

    /// The binary, run inside the workspace with a clean environment.
    pub fn docfill(&self) -> Command {
        let mut cmd = Command::cargo_bin("docfill").expect("binary is built");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("DOCFILL_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// A paragraph of plain runs, one per piece.
pub fn plain_paragraph(pieces: &[&str]) -> String {
    let runs: String = pieces.iter().map(|p| format!("<w:r><w:t>{p}</w:t></w:r>")).collect();
    format!("<w:p>{runs}</w:p>")
}

/// A single-cell table row.
pub fn row(cell: &str) -> String {
    format!("<w:tr><w:tc><w:p><w:r><w:t>{cell}</w:t></w:r></w:p></w:tc></w:tr>")
}
