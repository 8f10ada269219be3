//! Project configuration (`docfill.toml`).
//!
//! Every key is optional; a missing file means defaults.
//!
//! ```toml
//! # Container parts to fill (glob patterns over entry names)
//! parts = ["word/document.xml", "word/header*.xml", "content.xml"]
//!
//! # Wrapper elements removed when left empty
//! cleanup_tags = ["w:r", "w:t", "span", "text:span"]
//!
//! # Property elements that do not block boundary expansion
//! transparent_tags = ["w:rPr", "w:pPr"]
//!
//! # Safety ceilings
//! max_sections = 10000
//! max_depth = 64
//! ```
//!
//! # Lookup order
//!
//! 1. The path given with `--config`
//! 2. The path in the `DOCFILL_CONFIG` environment variable
//! 3. `docfill.toml` in the current directory
//!
//! The first existing file wins; if none exists the defaults are used.

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_CLEANUP_TAGS, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_SECTIONS, DEFAULT_PART_PATTERNS, DEFAULT_TRANSPARENT_TAGS,
};
use crate::core::FillError;
use crate::template::EngineOptions;

/// Contents of `docfill.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillConfig {
    /// Glob patterns selecting which container entries are filled.
    pub parts: Vec<String>,

    /// Tag names removed when they end up empty.
    pub cleanup_tags: Vec<String>,

    /// Tag names skipped over during boundary expansion.
    pub transparent_tags: Vec<String>,

    /// Ceiling on sections resolved per render level.
    pub max_sections: usize,

    /// Ceiling on section nesting.
    pub max_depth: usize,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            parts: DEFAULT_PART_PATTERNS.iter().map(ToString::to_string).collect(),
            cleanup_tags: DEFAULT_CLEANUP_TAGS.iter().map(ToString::to_string).collect(),
            transparent_tags: DEFAULT_TRANSPARENT_TAGS.iter().map(ToString::to_string).collect(),
            max_sections: DEFAULT_MAX_SECTIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FillConfig {
    /// Load configuration from an optional explicit path.
    ///
    /// Falls back to `DOCFILL_CONFIG`, then to `./docfill.toml`, then to
    /// defaults. An explicit path that does not exist is an error.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(FillError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            return Self::load_from(&path).await;
        }

        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, has
    /// unknown keys, or contains an invalid part pattern.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| FillError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Where configuration is looked up when no path is given.
    #[must_use]
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Check that every part pattern compiles.
    pub fn validate(&self) -> Result<()> {
        self.part_patterns().map(|_| ())
    }

    /// Compiled part patterns.
    pub fn part_patterns(&self) -> Result<Vec<Pattern>> {
        self.parts
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    anyhow::Error::from(FillError::ConfigError {
                        message: format!("invalid part pattern '{p}': {e}"),
                    })
                })
            })
            .collect()
    }

    /// Engine settings derived from this configuration.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            cleanup_tags: self.cleanup_tags.clone(),
            transparent_tags: self.transparent_tags.clone(),
            max_sections: self.max_sections,
            max_depth: self.max_depth,
        }
    }
}
