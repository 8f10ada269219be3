//! Heal fragmented markers in one XML part.
//!
//! ```bash
//! docfill heal word/document.xml -o healed.xml
//! unzip -p template.docx word/document.xml | docfill heal - > healed.xml
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use super::common::{load_engine, read_input, write_output};

/// Command to reassemble markers split across formatting runs.
#[derive(Args, Debug)]
pub struct HealCommand {
    /// XML part to heal, or `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl HealCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let engine = load_engine(config).await?;
        let xml = read_input(&self.input).await?;

        let healed = engine.heal(&xml);
        if healed == xml {
            tracing::debug!("No fragmented markers in {}", self.input.display());
        } else {
            tracing::info!("Healed markers in {}", self.input.display());
        }

        write_output(self.output.as_deref(), &healed).await
    }
}
