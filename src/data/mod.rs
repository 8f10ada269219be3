//! Loading template data from JSON, YAML or TOML.
//!
//! Whatever the source format, data ends up as a [`TemplateData`] mapping of
//! `serde_json` values. The root must be a mapping.
//!
//! ```rust,no_run
//! use docfill::data::load_data;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let data = load_data(Path::new("invoice.yaml")).await?;
//! println!("{} top-level keys", data.len());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};
use std::path::Path;
use tokio::fs;

use crate::core::FillError;
use crate::template::TemplateData;

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Read and parse a data file, choosing the format from its extension.
pub async fn load_data(path: &Path) -> Result<TemplateData> {
    let format = DataFormat::from_path(path).ok_or_else(|| FillError::UnsupportedDataFormat {
        path: path.display().to_string(),
    })?;

    if !path.exists() {
        return Err(FillError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    tracing::debug!("Loaded {} bytes of {:?} data from {}", text.len(), format, path.display());
    parse_data(&text, format, &path.display().to_string())
}

/// Parse data held in memory.
///
/// `source_name` only appears in error messages.
pub fn parse_data(text: &str, format: DataFormat, source_name: &str) -> Result<TemplateData> {
    let invalid = |reason: String| FillError::InvalidData {
        source_name: source_name.to_string(),
        reason,
    };

    let value = match format {
        DataFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| invalid(e.to_string()))?,
        DataFormat::Yaml => {
            serde_yaml::from_str::<Value>(text).map_err(|e| invalid(e.to_string()))?
        }
        DataFormat::Toml => {
            let table = toml::from_str::<toml::Table>(text).map_err(|e| invalid(e.to_string()))?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        // An empty YAML document parses as null.
        Value::Null => Ok(TemplateData::new()),
        other => Err(invalid(format!("root must be a mapping, found {}", kind_name(&other))).into()),
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect::<Map<_, _>>())
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
