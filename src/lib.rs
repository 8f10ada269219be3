//! docfill - heal and fill placeholder markers in word-processor XML
//!
//! Word processors freely split text into formatting runs. A marker typed as
//! `{customer.name}` often ends up stored as three runs, `{cust`, `omer.`
//! and `name}`, interleaved with spell-check and bookmark elements. docfill
//! works in two stages:
//!
//! 1. **Healing** reassembles every fragmented marker into one text segment
//!    without otherwise disturbing the markup.
//! 2. **Rendering** resolves `{#name}...{/name}` sections (loops over arrays,
//!    conditionals over other values) and substitutes `{path}` values from a
//!    JSON-like data tree, XML-escaped.
//!
//! Sections that occupy a whole paragraph or table row take their wrapping
//! elements with them, so a loop over a table row repeats the row.
//!
//! # Core Modules
//!
//! - [`template`] - tokenizer, healer, section engine, value rendering, cleanup
//! - [`data`] - loading template data from JSON, YAML or TOML
//! - [`package`] - filling the XML parts of zip containers such as `.docx`
//! - [`config`] - `docfill.toml` settings
//! - [`core`] - error types and user-facing error reporting
//! - [`cli`] - the `docfill` command-line interface
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//!
//! let xml = "<w:p><w:r><w:t>Dear {cust</w:t></w:r><w:r><w:t>omer}</w:t></w:r></w:p>";
//! let healed = docfill::heal(xml);
//! assert_eq!(healed, "<w:p><w:r><w:t>Dear {customer}</w:t></w:r></w:p>");
//!
//! let data = json!({"customer": "Ada & Co"}).as_object().unwrap().clone();
//! assert_eq!(
//!     docfill::render(&healed, &data),
//!     "<w:p><w:r><w:t>Dear Ada &amp; Co</w:t></w:r></w:p>"
//! );
//! ```
//!
//! # Configuration (docfill.toml)
//!
//! ```toml
//! parts = ["word/document.xml", "word/header*.xml", "word/footer*.xml", "content.xml"]
//! cleanup_tags = ["w:r", "w:t", "span", "text:span"]
//! transparent_tags = ["w:rPr", "w:pPr"]
//! max_sections = 10000
//! max_depth = 64
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod data;
pub mod package;
pub mod template;

// test_utils is available for unit tests and the integration test suite
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use template::{Engine, EngineOptions, TemplateData, heal, render};
