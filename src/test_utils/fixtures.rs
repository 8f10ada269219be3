//! Document and container fixtures.
//!
//! Helpers here panic on failure; they are meant for tests only.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// A run with formatting properties and one text element.
#[must_use]
pub fn run(text: &str) -> String {
    format!("<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{text}</w:t></w:r>")
}

/// A paragraph with one run per piece, as an editor produces after
/// spell-checking or re-formatting part of a marker.
#[must_use]
pub fn paragraph(pieces: &[&str]) -> String {
    let runs: String = pieces.iter().map(|p| run(p)).collect();
    format!("<w:p>{runs}</w:p>")
}

/// A complete `word/document.xml` body containing `paragraphs`.
#[must_use]
pub fn document(paragraphs: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}<w:sectPr/></w:body></w:document>",
        paragraphs.concat()
    )
}

/// Write a zip container holding text entries, in the given order.
///
/// Odd entries are stored, even entries deflated, so tests cover both
/// compression methods.
pub fn build_container(path: &Path, entries: &[(&str, &str)]) {
    let entries: Vec<(&str, &[u8])> =
        entries.iter().map(|(name, content)| (*name, content.as_bytes())).collect();
    build_container_bytes(path, &entries);
}

/// Write a zip container holding raw byte entries.
pub fn build_container_bytes(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create container");
    let mut writer = ZipWriter::new(file);
    for (i, (name, content)) in entries.iter().enumerate() {
        let method = if i % 2 == 0 {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };
        writer
            .start_file(*name, SimpleFileOptions::default().compression_method(method))
            .expect("start entry");
        writer.write_all(content).expect("write entry");
    }
    writer.finish().expect("finish container");
}

/// Read one entry of a container as UTF-8 text.
#[must_use]
pub fn read_entry(path: &Path, name: &str) -> String {
    let file = File::open(path).expect("open container");
    let mut archive = ZipArchive::new(file).expect("read container");
    let mut entry = archive.by_name(name).expect("entry exists");
    let mut text = String::new();
    entry.read_to_string(&mut text).expect("entry is UTF-8");
    text
}

/// Compression method of one entry.
#[must_use]
pub fn entry_compression(path: &Path, name: &str) -> CompressionMethod {
    let file = File::open(path).expect("open container");
    let mut archive = ZipArchive::new(file).expect("read container");
    archive.by_name(name).expect("entry exists").compression()
}
