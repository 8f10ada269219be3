//! Removal of wrapper elements left with no content.
//!
//! Healing moves marker text out of trailing runs and section removal can
//! take the only text out of a run, leaving `<w:r><w:t></w:t></w:r>` behind.
//! Only tag names in the configured list are touched; paragraphs and other
//! structural containers stay even when empty.

use regex::Regex;

/// Upper bound on collapse rounds; each round can only shrink the input.
const MAX_ROUNDS: usize = 32;

/// Compiled empty-wrapper patterns for a set of tag names.
#[derive(Debug, Clone)]
pub struct CleanupRules {
    patterns: Vec<Regex>,
}

impl CleanupRules {
    /// Compile one `<name ...></name>` pattern per tag name.
    ///
    /// Names are matched literally, so `w:r` never matches `<w:rPr>`. A
    /// wrapper holding nothing but `transparent` property elements (whose
    /// own children are all self-closing) also counts as empty.
    #[must_use]
    pub fn new<S: AsRef<str>, T: AsRef<str>>(tags: &[S], transparent: &[T]) -> Self {
        let props = property_pattern(transparent);
        let patterns = tags
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !name.is_empty())
            .filter_map(|name| {
                let name = regex::escape(name);
                Regex::new(&format!(r"<{name}(?:\s[^<>]*)?>{props}</{name}\s*>")).ok()
            })
            .collect();
        Self {
            patterns,
        }
    }

    /// Remove empty wrappers until none are left.
    #[must_use]
    pub fn apply(&self, xml: &str) -> String {
        let mut current = xml.to_string();
        for _ in 0..MAX_ROUNDS {
            let mut changed = false;
            for pattern in &self.patterns {
                if pattern.is_match(&current) {
                    current = pattern.replace_all(&current, "").into_owned();
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        current
    }
}

/// `(?:<p .../>|<p ...>(?:<x/>)*</p>)*` over every transparent name, or
/// nothing when there are none.
fn property_pattern<T: AsRef<str>>(transparent: &[T]) -> String {
    let names: Vec<String> = transparent
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.is_empty())
        .map(regex::escape)
        .collect();
    if names.is_empty() {
        return String::new();
    }
    let alternatives: Vec<String> = names
        .iter()
        .map(|t| format!(r"<{t}(?:\s[^<>]*)?/>|<{t}(?:\s[^<>]*)?>(?:<[^/<>][^<>]*/>)*</{t}\s*>"))
        .collect();
    format!("(?:{})*", alternatives.join("|"))
}
