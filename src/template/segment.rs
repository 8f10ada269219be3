//! Splitting raw XML into tag and text segments.
//!
//! The tokenizer knows nothing about XML beyond `<` and `>`: every `<...>` run
//! becomes a [`Segment::Tag`] and everything in between becomes a
//! [`Segment::Text`]. Concatenating the raw text of all segments in order
//! always reproduces the input exactly.

/// One piece of a tokenized XML string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A complete `<...>` run, including both angle brackets.
    Tag(String),
    /// Character data between two tags.
    Text(String),
}

impl Segment {
    /// The literal text this segment contributes to the document.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Segment::Tag(raw) | Segment::Text(raw) => raw,
        }
    }

    /// Returns `true` for tags of the form `<name .../>`.
    #[must_use]
    pub fn is_self_closing_tag(&self) -> bool {
        matches!(self, Segment::Tag(raw) if raw.ends_with("/>"))
    }

    /// Empties the segment while keeping its variant.
    pub fn clear(&mut self) {
        match self {
            Segment::Tag(raw) | Segment::Text(raw) => raw.clear(),
        }
    }
}

/// Split `xml` into an ordered sequence of tag and text segments.
///
/// A `<` that is never followed by a `>` turns the remainder of the input
/// into one trailing text segment. Empty input yields no segments.
#[must_use]
pub fn tokenize(xml: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < xml.len() {
        let rest = &xml[pos..];
        let Some(open) = rest.find('<') else {
            segments.push(Segment::Text(rest.to_string()));
            break;
        };

        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }

        let tag_start = pos + open;
        match xml[tag_start..].find('>') {
            Some(close) => {
                let tag_end = tag_start + close + 1;
                segments.push(Segment::Tag(xml[tag_start..tag_end].to_string()));
                pos = tag_end;
            }
            None => {
                tracing::trace!("Unterminated tag at byte {tag_start}, keeping remainder as text");
                segments.push(Segment::Text(xml[tag_start..].to_string()));
                break;
            }
        }
    }

    segments
}

/// Concatenate segments back into a single string.
#[must_use]
pub fn join_segments(segments: &[Segment]) -> String {
    let len = segments.iter().map(|s| s.raw().len()).sum();
    let mut out = String::with_capacity(len);
    for segment in segments {
        out.push_str(segment.raw());
    }
    out
}
