//! Looking up, testing and printing template data.

use serde_json::{Map, Value};

/// String-keyed data a document is rendered against.
pub type TemplateData = Map<String, Value>;

/// Resolve a dotted path such as `customer.address.city` in `scope`.
///
/// Returns `None` when any step is missing or tries to descend into something
/// that is not an object. Explicit `null` values are returned as `Some(Null)`.
#[must_use]
pub fn lookup<'a>(scope: &'a TemplateData, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = scope.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Section truthiness.
///
/// `false`, `null`, `0`, `""` and `[]` are falsy, as is a missing value.
/// Everything else is truthy, including the string `"0"` and `{}`.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

/// Text form of a value used for substitution, before escaping.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                Some(f) => f.to_string(),
                None => n.to_string(),
            }
        }
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Resolve `path` and return the escaped text to substitute.
///
/// Unresolvable paths render as the empty string.
#[must_use]
pub fn resolve_text(scope: &TemplateData, path: &str) -> String {
    lookup(scope, path).map(|v| escape_xml(&stringify(v))).unwrap_or_default()
}

/// Shallow merge: keys of `item` win over keys of `parent`.
///
/// Non-object items leave the parent scope as it is.
#[must_use]
pub fn merge_scope(parent: &TemplateData, item: &Value) -> TemplateData {
    let mut scope = parent.clone();
    if let Value::Object(fields) = item {
        for (key, value) in fields {
            scope.insert(key.clone(), value.clone());
        }
    }
    scope
}
