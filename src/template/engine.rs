//! The healing and rendering engine.
//!
//! [`Engine`] ties the pieces of this module together:
//!
//! 1. [`Engine::heal`] reassembles fragmented markers (see [`super::healer`]).
//! 2. [`Engine::render`] resolves sections against the data (see
//!    [`super::section`]), substitutes the remaining `{path}` markers with
//!    escaped values and finally removes empty wrapper elements.
//!
//! Rendering is a single left-to-right pass per nesting level. Each section
//! body is rendered recursively against its own scope and appended verbatim;
//! text between sections is substituted against the current scope.
//!
//! Neither operation can fail. Anything the engine cannot interpret (stray
//! braces, an open marker without a close marker, unknown paths) is left as
//! literal text or rendered empty.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cleanup::CleanupRules;
use super::healer::heal_markers;
use super::inspect::MarkerInfo;
use super::ribbon::{MarkerKind, Ribbon, find_next_marker};
use super::section::{SectionMatch, SectionScan, find_section};
use super::segment::tokenize;
use super::value::{TemplateData, is_truthy, lookup, merge_scope, resolve_text};
use crate::constants::{
    DEFAULT_CLEANUP_TAGS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SECTIONS, DEFAULT_TRANSPARENT_TAGS,
};

/// Tunables for an [`Engine`].
///
/// The defaults target WordprocessingML parts but also cover generic
/// `<span>` markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Wrapper elements removed when they end up with no content at all.
    pub cleanup_tags: Vec<String>,
    /// Property elements that do not prevent boundary expansion.
    pub transparent_tags: Vec<String>,
    /// Most sections resolved by one render level before giving up.
    pub max_sections: usize,
    /// Deepest section nesting that is still rendered.
    pub max_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cleanup_tags: DEFAULT_CLEANUP_TAGS.iter().map(ToString::to_string).collect(),
            transparent_tags: DEFAULT_TRANSPARENT_TAGS.iter().map(ToString::to_string).collect(),
            max_sections: DEFAULT_MAX_SECTIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Heals and renders XML document parts.
///
/// An engine holds only immutable compiled state and can be shared freely
/// between threads.
///
/// # Examples
///
/// ```
/// use docfill::template::{Engine, EngineOptions};
/// use serde_json::json;
///
/// let engine = Engine::new(EngineOptions::default());
/// let healed = engine.heal("<w:r><w:t>Hello {na</w:t></w:r><w:r><w:t>me}!</w:t></w:r>");
/// let data = json!({ "name": "Ada" });
/// let rendered = engine.render(&healed, data.as_object().unwrap());
/// assert_eq!(rendered, "<w:r><w:t>Hello Ada</w:t></w:r><w:r><w:t>!</w:t></w:r>");
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    options: EngineOptions,
    cleanup: CleanupRules,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let cleanup = CleanupRules::new(&options.cleanup_tags, &options.transparent_tags);
        Self {
            options,
            cleanup,
        }
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Reassemble markers split across several text segments.
    ///
    /// Returns the input unchanged when every marker is already contiguous,
    /// which makes healing idempotent.
    #[must_use]
    pub fn heal(&self, xml: &str) -> String {
        heal_markers(xml, &self.cleanup, &self.options.transparent_tags)
    }

    /// Resolve sections and values in already healed XML.
    ///
    /// Markers that are still fragmented do not match and pass through as
    /// literal text.
    #[must_use]
    pub fn render(&self, xml: &str, data: &TemplateData) -> String {
        let rendered = self.render_scope(xml, data, 0);
        self.cleanup.apply(&rendered)
    }

    /// Every marker in `xml`, healed or not, in document order.
    #[must_use]
    pub fn markers(&self, xml: &str) -> Vec<MarkerInfo> {
        let ribbon = Ribbon::build(&tokenize(xml));
        ribbon
            .markers()
            .into_iter()
            .map(|m| MarkerInfo {
                fragmented: ribbon.is_fragmented(&m),
                kind: m.kind,
                path: m.path,
                literal: m.literal,
            })
            .collect()
    }

    fn render_scope(&self, xml: &str, scope: &TemplateData, depth: usize) -> String {
        if depth > self.options.max_depth {
            tracing::warn!(
                "Section nesting deeper than {} levels, leaving content unrendered",
                self.options.max_depth
            );
            return xml.to_string();
        }

        let mut out = String::with_capacity(xml.len());
        let mut cursor = 0;
        let mut scan = 0;
        let mut resolved = 0;

        loop {
            if resolved >= self.options.max_sections {
                tracing::warn!(
                    "Resolved {} sections at depth {depth}, leaving the rest unresolved",
                    self.options.max_sections
                );
                break;
            }

            match find_section(xml, scan, cursor, &self.options.transparent_tags) {
                SectionScan::Done => break,
                SectionScan::Unmatched(open) => {
                    tracing::warn!("No closing marker for {}, leaving it as text", open.literal);
                    scan = open.end;
                }
                SectionScan::Found(section) => {
                    out.push_str(&substitute_values(&xml[cursor..section.open.start], scope));
                    out.push_str(&self.resolve_section(xml, &section, scope, depth));
                    cursor = section.close.end;
                    scan = cursor;
                    resolved += 1;
                }
            }
        }

        out.push_str(&substitute_values(&xml[cursor..], scope));
        out
    }

    fn resolve_section(
        &self,
        xml: &str,
        section: &SectionMatch,
        scope: &TemplateData,
        depth: usize,
    ) -> String {
        let inner = section.inner(xml);
        let value = lookup(scope, &section.name);

        match value {
            Some(Value::Array(items)) if !items.is_empty() => {
                tracing::debug!("Repeating section '{}' {} time(s)", section.name, items.len());
                items
                    .iter()
                    .map(|item| self.render_scope(inner, &child_scope(scope, item), depth + 1))
                    .collect()
            }
            Some(value) if is_truthy(Some(value)) => {
                tracing::debug!("Including section '{}'", section.name);
                self.render_scope(inner, &child_scope(scope, value), depth + 1)
            }
            _ => {
                tracing::debug!("Removing section '{}'", section.name);
                String::new()
            }
        }
    }
}

fn child_scope<'a>(scope: &'a TemplateData, value: &Value) -> Cow<'a, TemplateData> {
    if value.is_object() {
        Cow::Owned(merge_scope(scope, value))
    } else {
        Cow::Borrowed(scope)
    }
}

/// Replace each `{path}` marker in `text`; section markers are kept verbatim.
fn substitute_values(text: &str, scope: &TemplateData) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;
    while let Some(m) = find_next_marker(text, pos) {
        pos = m.end;
        if m.kind != MarkerKind::Value {
            continue;
        }
        out.push_str(&text[last..m.start]);
        out.push_str(&resolve_text(scope, &m.path));
        last = m.end;
    }
    out.push_str(&text[last..]);
    out
}
