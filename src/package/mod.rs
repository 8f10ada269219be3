//! Filling XML parts inside zip-based document containers.
//!
//! A `.docx` file is a zip archive whose body, headers and footers are
//! separate XML entries. [`PackageFiller`] selects the entries matching the
//! configured glob patterns, heals and renders each of them independently,
//! and writes a new archive:
//!
//! - entry order is preserved;
//! - filled entries keep their original compression method;
//! - every other entry is copied byte for byte without recompression.
//!
//! Parts share no state, so they are processed concurrently on the blocking
//! thread pool.
//!
//! ```rust,no_run
//! use docfill::config::FillConfig;
//! use docfill::package::PackageFiller;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let filler = PackageFiller::from_config(&FillConfig::default())?;
//! let data = docfill::data::load_data(Path::new("invoice.json")).await?;
//! let report = filler
//!     .fill(Path::new("invoice-template.docx"), Path::new("invoice.docx"), data)
//!     .await?;
//! println!("filled {} part(s)", report.parts.len());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use futures::future::try_join_all;
use glob::Pattern;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::sync::Arc;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::config::FillConfig;
use crate::core::FillError;
use crate::template::{Engine, TemplateData};

/// Outcome of processing one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    /// Names of the entries that were healed (and rendered), in archive order.
    pub parts: Vec<String>,
    /// Total number of entries written.
    pub entries: usize,
}

/// One selected entry, decoded.
#[derive(Debug)]
struct ExtractedPart {
    index: usize,
    name: String,
    xml: String,
}

/// Heals and fills the XML parts of zip containers.
#[derive(Debug, Clone)]
pub struct PackageFiller {
    engine: Arc<Engine>,
    patterns: Arc<Vec<Pattern>>,
}

impl PackageFiller {
    #[must_use]
    pub fn new(engine: Engine, patterns: Vec<Pattern>) -> Self {
        Self {
            engine: Arc::new(engine),
            patterns: Arc::new(patterns),
        }
    }

    /// Build a filler from engine options and part patterns in `config`.
    pub fn from_config(config: &FillConfig) -> Result<Self> {
        Ok(Self::new(Engine::new(config.engine_options()), config.part_patterns()?))
    }

    /// Heal and render every selected part of `input` into `output`.
    ///
    /// `input` and `output` may be the same path.
    pub async fn fill(
        &self,
        input: &Path,
        output: &Path,
        data: TemplateData,
    ) -> Result<PackageReport> {
        self.process(input, output, Some(Arc::new(data))).await
    }

    /// Heal every selected part of `input` into `output` without rendering.
    pub async fn heal(&self, input: &Path, output: &Path) -> Result<PackageReport> {
        self.process(input, output, None).await
    }

    async fn process(
        &self,
        input: &Path,
        output: &Path,
        data: Option<Arc<TemplateData>>,
    ) -> Result<PackageReport> {
        if !input.exists() {
            return Err(FillError::FileNotFound {
                path: input.display().to_string(),
            }
            .into());
        }

        let label = input.display().to_string();
        let bytes: Arc<[u8]> = tokio::fs::read(input)
            .await
            .with_context(|| format!("Failed to read container {label}"))?
            .into();

        let parts = {
            let bytes = Arc::clone(&bytes);
            let patterns = Arc::clone(&self.patterns);
            let label = label.clone();
            tokio::task::spawn_blocking(move || extract_parts(&bytes, &patterns, &label))
                .await
                .context("Part extraction task failed")??
        };

        if parts.is_empty() {
            return Err(FillError::PartNotFound {
                path: label,
            }
            .into());
        }

        tracing::info!("Processing {} part(s) of {}", parts.len(), label);

        let tasks = parts.into_iter().map(|part| {
            let engine = Arc::clone(&self.engine);
            let data = data.clone();
            tokio::task::spawn_blocking(move || {
                let healed = engine.heal(&part.xml);
                let xml = match data.as_deref() {
                    Some(data) => engine.render(&healed, data),
                    None => healed,
                };
                tracing::debug!(
                    "Processed part {} ({} -> {} bytes)",
                    part.name,
                    part.xml.len(),
                    xml.len()
                );
                (part.index, part.name, xml)
            })
        });
        let processed = try_join_all(tasks).await.context("Part processing task failed")?;

        let names = processed.iter().map(|(_, name, _)| name.clone()).collect();
        let rendered: HashMap<usize, String> =
            processed.into_iter().map(|(index, _, xml)| (index, xml)).collect();

        let (archive, entries) = {
            let label = label.clone();
            tokio::task::spawn_blocking(move || write_package(&bytes, &rendered, &label))
                .await
                .context("Container writing task failed")??
        };

        tokio::fs::write(output, archive)
            .await
            .with_context(|| format!("Failed to write container {}", output.display()))?;

        Ok(PackageReport {
            parts: names,
            entries,
        })
    }
}

fn package_error(label: &str, error: impl std::fmt::Display) -> FillError {
    FillError::PackageError {
        path: label.to_string(),
        reason: error.to_string(),
    }
}

fn extract_parts(bytes: &[u8], patterns: &[Pattern], label: &str) -> Result<Vec<ExtractedPart>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| package_error(label, e))?;
    let mut parts = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|e| package_error(label, e))?;
        if file.is_dir() || !patterns.iter().any(|p| p.matches(file.name())) {
            continue;
        }

        let name = file.name().to_string();
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).with_context(|| format!("Failed to read part {name}"))?;
        let xml = String::from_utf8(buf).map_err(|_| FillError::PartEncoding {
            part: name.clone(),
        })?;

        parts.push(ExtractedPart {
            index,
            name,
            xml,
        });
    }

    Ok(parts)
}

fn write_package(
    bytes: &[u8],
    rendered: &HashMap<usize, String>,
    label: &str,
) -> Result<(Vec<u8>, usize)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| package_error(label, e))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entries = archive.len();

    for index in 0..entries {
        let file = archive.by_index_raw(index).map_err(|e| package_error(label, e))?;
        match rendered.get(&index) {
            Some(xml) => {
                let name = file.name().to_string();
                let options = SimpleFileOptions::default().compression_method(file.compression());
                drop(file);
                writer.start_file(name, options).map_err(|e| package_error(label, e))?;
                writer.write_all(xml.as_bytes())?;
            }
            None => writer.raw_copy_file(file).map_err(|e| package_error(label, e))?,
        }
    }

    let cursor = writer.finish().map_err(|e| package_error(label, e))?;
    Ok((cursor.into_inner(), entries))
}
