//! List the markers of one XML part.
//!
//! Markers are listed as found in the input, so fragmented markers show up
//! with a `fragmented` flag instead of being healed first. With `--data`,
//! every value and section path the data does not provide is reported,
//! along with similarly named keys.
//!
//! # Output Formats
//!
//! ## Text Format (Default)
//! ```text
//! {customer.name}   value
//! {#items}          section open   fragmented
//! {/items}          section close
//! 3 marker(s), 1 fragmented
//! ✗ customer.nmae is not in the data (did you mean customer.name?)
//! ```
//!
//! ## JSON Format
//! ```json
//! {
//!   "markers": [
//!     {"kind": "value", "path": "customer.name", "literal": "{customer.name}", "fragmented": false}
//!   ],
//!   "unresolved": []
//! }
//! ```

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::CliConfig;
use super::common::{ensure_single_stdin, load_engine, read_data, read_input};
use crate::data::DataFormat;
use crate::template::{MarkerInfo, MarkerKind, UnresolvedMarker, check_markers};

/// Command to list and check markers.
#[derive(Args, Debug)]
pub struct MarkersCommand {
    /// XML part to inspect, or `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Data file to check marker paths against
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Data format, overriding detection from the file extension
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub data_format: Option<DataFormat>,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Fail when a marker path is missing from the data
    #[arg(long, requires = "data")]
    pub strict: bool,
}

/// Output format for the marker listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, colored listing
    Text,
    /// One JSON object with `markers` and, with `--data`, `unresolved`
    Json,
}

#[derive(Debug, Serialize)]
struct MarkersReport {
    markers: Vec<MarkerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unresolved: Option<Vec<UnresolvedMarker>>,
}

impl MarkersCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        if let Some(data) = &self.data {
            ensure_single_stdin(&self.input, data)?;
        }

        let engine = load_engine(config).await?;
        let xml = read_input(&self.input).await?;
        let markers = engine.markers(&xml);

        let unresolved = match &self.data {
            Some(path) => {
                let data = read_data(path, self.data_format).await?;
                Some(check_markers(&markers, &data))
            }
            None => None,
        };

        let report = MarkersReport {
            markers,
            unresolved,
        };
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_text(&report),
        }

        let missing = report.unresolved.as_ref().map_or(0, Vec::len);
        if self.strict && missing > 0 {
            bail!("{missing} marker path(s) are not provided by the data");
        }
        Ok(())
    }
}

const fn kind_label(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Value => "value",
        MarkerKind::SectionOpen => "section open",
        MarkerKind::SectionClose => "section close",
    }
}

fn print_text(report: &MarkersReport) {
    let width = report.markers.iter().map(|m| m.literal.chars().count()).max().unwrap_or(0);

    for marker in &report.markers {
        let literal = format!("{:<width$}", marker.literal);
        let label = format!("{:<13}", kind_label(marker.kind));
        if marker.fragmented {
            println!("{}  {}  {}", literal.cyan(), label, "fragmented".yellow());
        } else {
            println!("{}  {}", literal.cyan(), label.trim_end());
        }
    }

    let fragmented = report.markers.iter().filter(|m| m.fragmented).count();
    println!("{} marker(s), {} fragmented", report.markers.len(), fragmented);

    let Some(unresolved) = &report.unresolved else {
        return;
    };
    if unresolved.is_empty() {
        println!("{} All marker paths resolve", "✓".green());
        return;
    }
    for missing in unresolved {
        if missing.suggestions.is_empty() {
            println!("{} {} is not in the data", "✗".red(), missing.path);
        } else {
            println!(
                "{} {} is not in the data (did you mean {}?)",
                "✗".red(),
                missing.path,
                missing.suggestions.join(", ")
            );
        }
    }
}
