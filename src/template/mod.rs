//! Healing and filling placeholder markers in document XML.
//!
//! Documents written in word processors contain markers such as `{name}`,
//! `{#items}` and `{/items}`, but the editor is free to spread a single marker
//! over several runs:
//!
//! ```xml
//! <w:r><w:t>{cust</w:t></w:r><w:proofErr w:type="spellStart"/><w:r><w:t>omer}</w:t></w:r>
//! ```
//!
//! Processing a part happens in two calls:
//!
//! - [`heal`] puts every marker back into a single text segment.
//! - [`render`] resolves sections against the data, substitutes values with
//!   XML escaping and removes wrapper elements that ended up empty.
//!
//! # Marker syntax
//!
//! | Marker | Meaning |
//! |---|---|
//! | `{name}` | Value of `name`, escaped. Missing values render empty. |
//! | `{a.b.c}` | Nested lookup `a` → `b` → `c`. |
//! | `{#name}…{/name}` | Repeated for each element of an array, included once for any other truthy value, removed otherwise. |
//!
//! `false`, `null`, `0`, `""`, `[]` and missing values are falsy. Inside a
//! repeated section the fields of the current element are merged over the
//! surrounding data, so outer values stay reachable.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//!
//! let xml = "<p>{#items}<span>{label}: {price}</span>{/items}</p>";
//! let data = json!({
//!     "items": [
//!         { "label": "Tea", "price": 3 },
//!         { "label": "Cake", "price": 4.5 },
//!     ]
//! });
//!
//! let out = docfill::render(&docfill::heal(xml), data.as_object().unwrap());
//! assert_eq!(out, "<p><span>Tea: 3</span><span>Cake: 4.5</span></p>");
//! ```

mod cleanup;
mod engine;
mod healer;
mod inspect;
pub mod ribbon;
pub mod section;
pub mod segment;
mod value;


use std::sync::LazyLock;

pub use cleanup::CleanupRules;
pub use engine::{Engine, EngineOptions};
pub use inspect::{MarkerInfo, UnresolvedMarker, check_markers};
pub use ribbon::{MarkerKind, PlaceholderMatch};
pub use value::{TemplateData, escape_xml, is_truthy, lookup, stringify};

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::default);

/// Heal `xml` with the default [`EngineOptions`].
#[must_use]
pub fn heal(xml: &str) -> String {
    DEFAULT_ENGINE.heal(xml)
}

/// Render healed `xml` against `data` with the default [`EngineOptions`].
#[must_use]
pub fn render(xml: &str, data: &TemplateData) -> String {
    DEFAULT_ENGINE.render(xml, data)
}
