//! Heal and fill the XML parts of a zip-based document.
//!
//! The parts to process are selected by the `parts` patterns of
//! `docfill.toml` (by default the body, headers, footers, footnotes and
//! endnotes of a `.docx`).
//!
//! ```bash
//! docfill fill template.docx --data invoice.yaml -o invoice.docx
//! docfill fill template.docx --heal-only -o template.docx
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::CliConfig;
use super::common::{load_config, read_data};
use crate::data::DataFormat;
use crate::package::{PackageFiller, PackageReport};

/// Command to fill a document container.
#[derive(Args, Debug)]
pub struct FillCommand {
    /// Container to fill (.docx or another zip of XML parts)
    #[arg(value_name = "CONTAINER")]
    pub input: PathBuf,

    /// Data file (.json, .yaml, .yml or .toml), or `-` for stdin
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "heal_only",
        conflicts_with = "heal_only"
    )]
    pub data: Option<PathBuf>,

    /// Data format, overriding detection from the file extension
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub data_format: Option<DataFormat>,

    /// Where to write the filled container; may equal the input
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Only heal markers, leaving them unrendered
    #[arg(long)]
    pub heal_only: bool,
}

impl FillCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let fill_config = load_config(config).await?;
        let filler = PackageFiller::from_config(&fill_config)?;

        let report = match &self.data {
            Some(data_path) => {
                let data = read_data(data_path, self.data_format).await?;
                filler.fill(&self.input, &self.output, data).await?
            }
            None => filler.heal(&self.input, &self.output).await?,
        };

        if !config.quiet {
            self.print_report(&report);
        }
        Ok(())
    }

    fn print_report(&self, report: &PackageReport) {
        let verb = if self.heal_only {
            "Healed"
        } else {
            "Filled"
        };
        println!(
            "{} {} {} part(s) of {} into {}",
            "✓".green(),
            verb,
            report.parts.len(),
            self.input.display(),
            self.output.display()
        );
        for part in &report.parts {
            println!("  {part}");
        }
    }
}
