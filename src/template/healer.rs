//! Reassembling markers that the editor split across several runs.
//!
//! For a marker spread over segments `first..=last`:
//!
//! - `first` keeps its text up to the marker and receives the whole marker;
//! - `last` keeps only the text after the closing brace;
//! - text segments strictly in between are emptied;
//! - self-closing tags strictly in between (proofing marks, bookmarks) are
//!   dropped, unless they sit inside a transparent property element such as
//!   `<w:rPr>`, where they carry the formatting of the remaining text;
//! - paired open and close tags in between are kept so that any remaining
//!   text stays correctly wrapped.
//!
//! Markers are rewritten from last to first so that segment indices computed
//! from the original ribbon stay valid.

use super::cleanup::CleanupRules;
use super::ribbon::{PlaceholderMatch, Ribbon};
use super::segment::{Segment, join_segments, tokenize};

/// Heal every fragmented marker in `xml`.
///
/// When nothing needed healing the input is returned unchanged, byte for byte.
#[must_use]
pub fn heal_markers(xml: &str, cleanup: &CleanupRules, transparent: &[String]) -> String {
    let mut segments = tokenize(xml);
    let ribbon = Ribbon::build(&segments);
    let fragmented: Vec<PlaceholderMatch> =
        ribbon.markers().into_iter().filter(|m| ribbon.is_fragmented(m)).collect();

    if fragmented.is_empty() {
        return xml.to_string();
    }

    tracing::debug!("Healing {} fragmented marker(s)", fragmented.len());

    for marker in fragmented.iter().rev() {
        consolidate(&mut segments, &ribbon, marker, transparent);
    }

    cleanup.apply(&join_segments(&segments))
}

fn consolidate(
    segments: &mut [Segment],
    ribbon: &Ribbon,
    marker: &PlaceholderMatch,
    transparent: &[String],
) {
    let (Some(first), Some(last)) = (ribbon.origin(marker.start), ribbon.origin(marker.end - 1))
    else {
        return;
    };

    tracing::trace!(
        "Consolidating {} from segment {} into segment {}",
        marker.literal,
        last.segment,
        first.segment
    );

    if let Segment::Text(content) = &mut segments[last.segment] {
        content.replace_range(..=last.offset, "");
    }

    let mut property_depth = 0usize;
    for segment in &mut segments[first.segment + 1..last.segment] {
        let clear = match &*segment {
            Segment::Text(_) => true,
            Segment::Tag(raw) => {
                let is_property = transparent.iter().any(|t| t == tag_name(raw));
                if segment.is_self_closing_tag() {
                    property_depth == 0 && !is_property
                } else {
                    if is_property && raw.starts_with("</") {
                        property_depth = property_depth.saturating_sub(1);
                    } else if is_property {
                        property_depth += 1;
                    }
                    false
                }
            }
        };
        if clear {
            segment.clear();
        }
    }

    if let Segment::Text(content) = &mut segments[first.segment] {
        content.truncate(first.offset);
        content.push_str(&marker.literal);
    }
}

/// Element name of a raw tag: `</w:rPr>` and `<w:rPr a="1"/>` give `w:rPr`.
fn tag_name(raw: &str) -> &str {
    raw.trim_start_matches('<')
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default()
}
