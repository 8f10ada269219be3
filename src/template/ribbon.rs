//! The text ribbon and the marker locator.
//!
//! Word processors routinely split one marker such as `{customer.name}` over
//! several runs. The ribbon is the concatenation of every text segment in a
//! document, which makes those markers visible again regardless of the markup
//! between their characters. Each ribbon byte remembers where it came from so
//! the healer can map a match back onto the segments.
//!
//! Marker grammar:
//!
//! | Form | Kind |
//! |---|---|
//! | `{name}`, `{a.b.c}` | [`MarkerKind::Value`] |
//! | `{#name}` | [`MarkerKind::SectionOpen`] |
//! | `{/name}` | [`MarkerKind::SectionClose`] |
//!
//! A name starts with an ASCII letter or underscore and continues with ASCII
//! letters, digits, underscores or dots. Anything else in braces (`{}`, `{#}`,
//! `{free text}`) is not a marker.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::segment::Segment;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([#/]?)([A-Za-z_][A-Za-z0-9_.]*)\}").expect("marker pattern is valid")
});

/// Which of the three marker forms a match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// `{name}`
    Value,
    /// `{#name}`
    SectionOpen,
    /// `{/name}`
    SectionClose,
}

/// One marker occurrence.
///
/// `start` and `end` are byte offsets into whatever string was scanned (the
/// ribbon when healing, the document itself when rendering); `end` is
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderMatch {
    pub start: usize,
    pub end: usize,
    /// The marker exactly as written, braces included.
    pub literal: String,
    pub kind: MarkerKind,
    /// The dotted path between the braces, without `#` or `/`.
    pub path: String,
}

/// Find the first marker in `text` starting at or after byte `from`.
///
/// Stateless: every call starts a fresh search, so callers can interleave
/// searches over different strings freely.
#[must_use]
pub fn find_next_marker(text: &str, from: usize) -> Option<PlaceholderMatch> {
    if from > text.len() {
        return None;
    }
    let caps = MARKER_RE.captures_at(text, from)?;
    let whole = caps.get(0)?;
    let kind = match caps.get(1).map(|m| m.as_str()) {
        Some("#") => MarkerKind::SectionOpen,
        Some("/") => MarkerKind::SectionClose,
        _ => MarkerKind::Value,
    };
    Some(PlaceholderMatch {
        start: whole.start(),
        end: whole.end(),
        literal: whole.as_str().to_string(),
        kind,
        path: caps.get(2)?.as_str().to_string(),
    })
}

/// All non-overlapping markers in `text`, left to right.
#[must_use]
pub fn find_markers(text: &str) -> Vec<PlaceholderMatch> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(m) = find_next_marker(text, pos) {
        pos = m.end;
        found.push(m);
    }
    found
}

/// Back-reference from one ribbon byte to the segment it was copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharOrigin {
    pub segment: usize,
    pub offset: usize,
}

/// Concatenated text content of a segment sequence.
#[derive(Debug, Default)]
pub struct Ribbon {
    text: String,
    origins: Vec<CharOrigin>,
}

impl Ribbon {
    /// Build the ribbon for `segments`. Tag segments contribute nothing.
    #[must_use]
    pub fn build(segments: &[Segment]) -> Self {
        let mut ribbon = Self::default();
        for (index, segment) in segments.iter().enumerate() {
            if let Segment::Text(content) = segment {
                ribbon.text.push_str(content);
                ribbon.origins.extend((0..content.len()).map(|offset| CharOrigin {
                    segment: index,
                    offset,
                }));
            }
        }
        ribbon
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where ribbon byte `index` came from.
    #[must_use]
    pub fn origin(&self, index: usize) -> Option<CharOrigin> {
        self.origins.get(index).copied()
    }

    /// Every marker on the ribbon.
    #[must_use]
    pub fn markers(&self) -> Vec<PlaceholderMatch> {
        find_markers(&self.text)
    }

    /// Returns `true` when a marker's first and last byte live in different
    /// segments.
    #[must_use]
    pub fn is_fragmented(&self, m: &PlaceholderMatch) -> bool {
        match (self.origin(m.start), self.origin(m.end.saturating_sub(1))) {
            (Some(first), Some(last)) => first.segment != last.segment,
            _ => false,
        }
    }
}
