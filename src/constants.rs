//! Global constants used throughout the docfill codebase.
//!
//! Defaults for the engine and the packaging layer live here so that the
//! configuration file, the CLI and the library agree on them.

/// Name of the project configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "docfill.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "DOCFILL_CONFIG";

/// Wrapper elements removed when left without any content.
///
/// Runs and text elements in WordprocessingML, ODF style spans, plus generic
/// `<span>`. Paragraphs are not listed: an empty paragraph is still a visible
/// line.
pub const DEFAULT_CLEANUP_TAGS: &[&str] = &["w:r", "w:t", "span", "text:span"];

/// Property elements that may precede a marker inside its wrapper without
/// blocking boundary expansion.
pub const DEFAULT_TRANSPARENT_TAGS: &[&str] = &["w:rPr", "w:pPr"];

/// Maximum number of sections resolved by one render level.
///
/// Guarantees termination on adversarial input; the remainder of the part is
/// returned unresolved once reached.
pub const DEFAULT_MAX_SECTIONS: usize = 10_000;

/// Maximum section nesting depth that is still rendered.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Container parts filled by default.
///
/// The main body plus every header, footer, footnote and endnote part of a
/// WordprocessingML package, and the content and styles parts of an ODF
/// package. Patterns match whole entry names, so `styles.xml` never selects
/// `word/styles.xml`.
pub const DEFAULT_PART_PATTERNS: &[&str] = &[
    "word/document.xml",
    "word/header*.xml",
    "word/footer*.xml",
    "word/footnotes.xml",
    "word/endnotes.xml",
    "content.xml",
    "styles.xml",
];
