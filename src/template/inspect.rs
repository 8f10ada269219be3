//! Marker listing and data coverage checks.
//!
//! Used by `docfill markers` to show what a document expects before it is
//! rendered. Coverage checking is advisory: a path counts as resolved if it
//! resolves against the root data or against any object nested anywhere in
//! it, since loop bodies are rendered against item scopes.

use serde::Serialize;
use serde_json::Value;
use strsim::levenshtein;

use super::ribbon::MarkerKind;
use super::value::{TemplateData, lookup};

/// Maximum edit distance, as a percentage of the path length, for a key to be
/// suggested as a likely intended name.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Most suggestions reported for one unresolved path.
const MAX_SUGGESTIONS: usize = 3;

/// A marker found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerInfo {
    pub kind: MarkerKind,
    pub path: String,
    pub literal: String,
    /// Whether the marker is spread over more than one text segment.
    pub fragmented: bool,
}

/// A marker path that the data does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedMarker {
    pub path: String,
    pub kind: MarkerKind,
    pub suggestions: Vec<String>,
}

/// Report every distinct value or section-open path missing from `data`.
#[must_use]
pub fn check_markers(markers: &[MarkerInfo], data: &TemplateData) -> Vec<UnresolvedMarker> {
    let mut scopes = vec![data];
    collect_scopes(data, &mut scopes);

    let mut known_paths = Vec::new();
    for scope in &scopes {
        collect_paths(scope, "", &mut known_paths);
    }
    known_paths.sort();
    known_paths.dedup();

    let mut unresolved: Vec<UnresolvedMarker> = Vec::new();
    for marker in markers {
        if marker.kind == MarkerKind::SectionClose {
            continue;
        }
        if unresolved.iter().any(|u| u.path == marker.path) {
            continue;
        }
        if scopes.iter().any(|scope| lookup(scope, &marker.path).is_some()) {
            continue;
        }
        tracing::debug!("Marker path '{}' not found in data", marker.path);
        unresolved.push(UnresolvedMarker {
            path: marker.path.clone(),
            kind: marker.kind,
            suggestions: suggest(&marker.path, &known_paths),
        });
    }
    unresolved
}

fn collect_scopes<'a>(map: &'a TemplateData, scopes: &mut Vec<&'a TemplateData>) {
    for value in map.values() {
        collect_value_scopes(value, scopes);
    }
}

fn collect_value_scopes<'a>(value: &'a Value, scopes: &mut Vec<&'a TemplateData>) {
    match value {
        Value::Object(map) => {
            scopes.push(map);
            collect_scopes(map, scopes);
        }
        Value::Array(items) => {
            for item in items {
                collect_value_scopes(item, scopes);
            }
        }
        _ => {}
    }
}

fn collect_paths(map: &TemplateData, prefix: &str, paths: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Value::Object(child) = value {
            collect_paths(child, &path, paths);
        }
        paths.push(path);
    }
}

fn suggest(path: &str, known: &[String]) -> Vec<String> {
    let threshold = (path.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
    let mut candidates: Vec<(usize, &String)> = known
        .iter()
        .map(|candidate| (levenshtein(path, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .collect();
    candidates.sort();
    candidates.into_iter().take(MAX_SUGGESTIONS).map(|(_, c)| c.clone()).collect()
}
