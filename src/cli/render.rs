//! Heal and render one XML part.
//!
//! ```bash
//! docfill render word/document.xml --data invoice.json -o document.xml
//! cat invoice.yaml | docfill render healed.xml --data - --data-format yaml --no-heal
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use super::common::{ensure_single_stdin, load_engine, read_data, read_input, write_output};
use crate::data::DataFormat;

/// Command to fill one XML part with data.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// XML part to render, or `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Data file (.json, .yaml, .yml or .toml), or `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Data format, overriding detection from the file extension
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub data_format: Option<DataFormat>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip healing; the input is already healed
    #[arg(long)]
    pub no_heal: bool,
}

impl RenderCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        ensure_single_stdin(&self.input, &self.data)?;

        let engine = load_engine(config).await?;
        let data = read_data(&self.data, self.data_format).await?;
        let xml = read_input(&self.input).await?;

        let xml = if self.no_heal {
            xml
        } else {
            engine.heal(&xml)
        };
        let rendered = engine.render(&xml, &data);
        tracing::debug!("Rendered {} bytes into {} bytes", xml.len(), rendered.len());

        write_output(self.output.as_deref(), &rendered).await
    }
}
