//! Locating `{#name}…{/name}` sections and widening them over wrapper markup.
//!
//! Pairing counts only markers with the same name, so
//! `{#a}{#a}x{/a}{/a}` pairs the outer markers with each other. An open marker
//! without a partner is reported as [`SectionScan::Unmatched`] and left alone
//! by the renderer.
//!
//! # Boundary expansion
//!
//! A marker that sits alone inside an element, such as
//! `<w:p><w:r><w:t>{#rows}</w:t></w:r></w:p>`, should take that element with
//! it when it is replaced. Starting from the raw marker the boundary is
//! widened one element at a time while the nearest tag on the left is an open
//! tag, the nearest tag on the right is its matching close tag, and only
//! whitespace separates them from the boundary. Each step takes the innermost
//! such pair; expansion stops at the first step where no pair qualifies.
//!
//! Elements listed as transparent (run and paragraph properties by default)
//! may sit between the wrapping open tag and the boundary without blocking
//! expansion; they are swallowed with the wrapper.

use std::ops::Range;

use super::ribbon::{MarkerKind, PlaceholderMatch, find_next_marker};

/// One resolved section after boundary expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    /// Dotted path from the open marker.
    pub name: String,
    /// Expanded span covering the open marker.
    pub open: Range<usize>,
    /// Expanded span covering the close marker.
    pub close: Range<usize>,
}

impl SectionMatch {
    /// The content between the two boundaries.
    #[must_use]
    pub fn inner<'a>(&self, xml: &'a str) -> &'a str {
        &xml[self.open.end..self.close.start]
    }

    /// Span of the whole section, both markers included.
    #[must_use]
    pub fn outer(&self) -> Range<usize> {
        self.open.start..self.close.end
    }
}

/// Result of looking for the next section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionScan {
    Found(SectionMatch),
    /// An open marker with no matching close marker.
    Unmatched(PlaceholderMatch),
    /// No further open markers.
    Done,
}

/// Find the next section whose open marker starts at or after `from`.
///
/// Boundary expansion never reaches left of `floor`.
#[must_use]
pub fn find_section(xml: &str, from: usize, floor: usize, transparent: &[String]) -> SectionScan {
    let mut pos = from;
    let open = loop {
        match find_next_marker(xml, pos) {
            Some(m) if m.kind == MarkerKind::SectionOpen => break m,
            Some(m) => pos = m.end,
            None => return SectionScan::Done,
        }
    };

    let Some(close) = matching_close(xml, &open) else {
        return SectionScan::Unmatched(open);
    };

    let open_span = expand_boundary(xml, open.start..open.end, floor, close.start, transparent);
    let close_span =
        expand_boundary(xml, close.start..close.end, open_span.end, xml.len(), transparent);

    tracing::trace!(
        "Section '{}' open {:?} -> {:?}, close {:?} -> {:?}",
        open.path,
        open.start..open.end,
        open_span,
        close.start..close.end,
        close_span
    );

    SectionScan::Found(SectionMatch {
        name: open.path,
        open: open_span,
        close: close_span,
    })
}

/// Depth-count same-named markers after `open` to find its partner.
fn matching_close(xml: &str, open: &PlaceholderMatch) -> Option<PlaceholderMatch> {
    let mut depth = 1usize;
    let mut pos = open.end;
    while let Some(m) = find_next_marker(xml, pos) {
        pos = m.end;
        if m.path != open.path {
            continue;
        }
        match m.kind {
            MarkerKind::SectionOpen => depth += 1,
            MarkerKind::SectionClose => {
                depth -= 1;
                if depth == 0 {
                    return Some(m);
                }
            }
            MarkerKind::Value => {}
        }
    }
    None
}

/// Widen `span` over every element that wraps nothing but it.
///
/// The result stays inside `floor..ceiling`.
#[must_use]
pub fn expand_boundary(
    xml: &str,
    span: Range<usize>,
    floor: usize,
    ceiling: usize,
    transparent: &[String],
) -> Range<usize> {
    let mut span = span;
    while let Some(wider) = wrapping_element(xml, &span, floor, ceiling, transparent) {
        span = wider;
    }
    span
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagShape<'a> {
    Open(&'a str),
    Close(&'a str),
    SelfClosing(&'a str),
    Other,
}

fn classify(raw: &str) -> TagShape<'_> {
    let Some(inner) = raw.strip_prefix('<').and_then(|r| r.strip_suffix('>')) else {
        return TagShape::Other;
    };
    if inner.starts_with('?') || inner.starts_with('!') {
        return TagShape::Other;
    }
    let closing = inner.starts_with('/');
    let body = inner.strip_prefix('/').unwrap_or(inner);
    let Some(name) = body
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .filter(|name| !name.is_empty())
    else {
        return TagShape::Other;
    };

    if closing {
        TagShape::Close(name)
    } else if inner.ends_with('/') {
        TagShape::SelfClosing(name)
    } else {
        TagShape::Open(name)
    }
}

fn skip_ws_back(xml: &str, mut pos: usize, floor: usize) -> usize {
    let bytes = xml.as_bytes();
    while pos > floor && bytes[pos - 1].is_ascii_whitespace() {
        pos -= 1;
    }
    pos
}

fn skip_ws_fwd(xml: &str, mut pos: usize, ceiling: usize) -> usize {
    let bytes = xml.as_bytes();
    while pos < ceiling && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// The tag whose `>` is the byte just before `end`.
fn tag_ending_at(xml: &str, end: usize, floor: usize) -> Option<(usize, TagShape<'_>)> {
    if end <= floor || xml.as_bytes()[end - 1] != b'>' {
        return None;
    }
    let start = floor + xml[floor..end - 1].rfind('<')?;
    if xml[start + 1..end - 1].contains('>') {
        return None;
    }
    Some((start, classify(&xml[start..end])))
}

/// The tag whose `<` is at `start`, ending at or before `ceiling`.
fn tag_starting_at(xml: &str, start: usize, ceiling: usize) -> Option<(usize, TagShape<'_>)> {
    if start >= ceiling || xml.as_bytes()[start] != b'<' {
        return None;
    }
    let end = start + xml[start..ceiling].find('>')? + 1;
    Some((end, classify(&xml[start..end])))
}

/// Start of the nearest `<name` open tag before `before`.
fn open_tag_before(xml: &str, name: &str, before: usize, floor: usize) -> Option<usize> {
    let needle = format!("<{name}");
    let mut limit = before;
    while let Some(found) = xml[floor..limit].rfind(&needle) {
        let start = floor + found;
        let next = xml.as_bytes().get(start + needle.len()).copied();
        if matches!(next, Some(b'>' | b'/')) || next.is_some_and(|b| b.is_ascii_whitespace()) {
            return Some(start);
        }
        limit = start;
    }
    None
}

fn wrapping_element(
    xml: &str,
    span: &Range<usize>,
    floor: usize,
    ceiling: usize,
    transparent: &[String],
) -> Option<Range<usize>> {
    let is_transparent = |name: &str| transparent.iter().any(|t| t == name);

    let mut left = skip_ws_back(xml, span.start, floor);
    let (open_start, open_name) = loop {
        let (tag_start, shape) = tag_ending_at(xml, left, floor)?;
        match shape {
            TagShape::Open(name) => break (tag_start, name),
            TagShape::SelfClosing(name) if is_transparent(name) => {
                left = skip_ws_back(xml, tag_start, floor);
            }
            TagShape::Close(name) if is_transparent(name) => {
                let start = open_tag_before(xml, name, tag_start, floor)?;
                left = skip_ws_back(xml, start, floor);
            }
            _ => return None,
        }
    };

    let right = skip_ws_fwd(xml, span.end, ceiling);
    match tag_starting_at(xml, right, ceiling)? {
        (close_end, TagShape::Close(name)) if name == open_name => Some(open_start..close_end),
        _ => None,
    }
}
