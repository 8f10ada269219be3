//! Input, output and setup shared by the subcommands.

use anyhow::{Context, Result, bail};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::CliConfig;
use crate::config::FillConfig;
use crate::core::FillError;
use crate::data::{DataFormat, load_data, parse_data};
use crate::template::{Engine, TemplateData};

/// Path argument meaning standard input.
pub const STDIN_ARG: &str = "-";

const STDIN_NAME: &str = "<stdin>";

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_ARG
}

/// Load the configuration selected by `--config` or the default lookup.
pub async fn load_config(config: &CliConfig) -> Result<FillConfig> {
    FillConfig::load_with_optional(config.config_path.clone()).await
}

/// Build an engine from the active configuration.
pub async fn load_engine(config: &CliConfig) -> Result<Engine> {
    let fill_config = load_config(config).await?;
    Ok(Engine::new(fill_config.engine_options()))
}

/// Read an XML part from a file or, for `-`, from stdin.
pub async fn read_input(input: &Path) -> Result<String> {
    if is_stdin(input) {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read XML from stdin")?;
        return Ok(text);
    }

    if !input.exists() {
        return Err(FillError::FileNotFound {
            path: input.display().to_string(),
        }
        .into());
    }

    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))
}

/// Load data from a file or stdin.
///
/// `format` overrides detection from the extension and is required for
/// stdin.
pub async fn read_data(path: &Path, format: Option<DataFormat>) -> Result<TemplateData> {
    if is_stdin(path) {
        let Some(format) = format else {
            return Err(FillError::UnsupportedDataFormat {
                path: STDIN_NAME.to_string(),
            }
            .into());
        };
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read data from stdin")?;
        return parse_data(&text, format, STDIN_NAME);
    }

    match format {
        None => load_data(path).await,
        Some(format) => {
            if !path.exists() {
                return Err(FillError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read data file {}", path.display()))?;
            parse_data(&text, format, &path.display().to_string())
        }
    }
}

/// Reject reading both the document and the data from stdin.
pub fn ensure_single_stdin(input: &Path, data: &Path) -> Result<()> {
    if is_stdin(input) && is_stdin(data) {
        bail!("Only one of the input and --data can be read from stdin");
    }
    Ok(())
}

/// Write `content` to `output`, or to stdout when no output is given.
///
/// Stdout receives the bytes unchanged, without a trailing newline.
pub async fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await.context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to write to stdout")
        }
    }
}
