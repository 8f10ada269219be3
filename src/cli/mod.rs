//! Command-line interface for docfill.
//!
//! Each subcommand lives in its own module with its own argument struct and
//! an async `execute` method:
//!
//! - `heal` - reassemble fragmented markers in one XML part
//! - `render` - heal and fill one XML part with data
//! - `fill` - heal and fill the XML parts of a zip container (`.docx`)
//! - `markers` - list the markers of a part and check them against data
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging on stderr
//! - `--quiet` / `-q` - no logging
//! - `--config <path>` - use this `docfill.toml` instead of the default lookup
//!
//! # Example
//!
//! ```bash
//! # Repair a part that an editor split into several runs
//! docfill heal word/document.xml -o healed.xml
//!
//! # Fill a whole document
//! docfill fill invoice-template.docx --data invoice.yaml -o invoice.docx
//!
//! # See what data a template expects
//! docfill markers healed.xml --data invoice.yaml
//! ```

mod common;
mod fill;
mod heal;
mod markers;
mod render;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use markers::OutputFormat;

/// Runtime configuration for CLI execution.
///
/// Built from the global flags so commands never read them directly; tests
/// construct it by hand.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` disables logging.
    pub log_level: Option<String>,

    /// Explicit configuration file, bypassing the default lookup.
    pub config_path: Option<PathBuf>,

    /// Suppress status lines on stdout.
    pub quiet: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

/// Heal fragmented placeholder markers in word-processor XML and fill them
/// with structured data.
#[derive(Parser, Debug)]
#[command(
    name = "docfill",
    about = "Heal and fill {placeholder} markers in word-processor XML",
    version,
    long_about = "docfill repairs {markers} that word processors split across formatting runs, \
                  then fills values and {#sections} from JSON, YAML or TOML data."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    ///
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress logging. Errors are still reported.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a docfill.toml configuration file.
    ///
    /// Without this option, `DOCFILL_CONFIG` and then `./docfill.toml` are
    /// tried; when neither exists the built-in defaults are used.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reassemble markers split across formatting runs.
    ///
    /// See [`heal::HealCommand`].
    Heal(heal::HealCommand),

    /// Heal one XML part and fill it with data.
    ///
    /// See [`render::RenderCommand`].
    Render(render::RenderCommand),

    /// Heal and fill the XML parts of a zip-based document.
    ///
    /// See [`fill::FillCommand`].
    Fill(fill::FillCommand),

    /// List the markers of one XML part, optionally checked against data.
    ///
    /// See [`markers::MarkersCommand`].
    Markers(markers::MarkersCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` selects `debug` and `--quiet` disables logging. Otherwise
    /// `RUST_LOG` is used when set, falling back to `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            quiet: self.quiet,
        }
    }

    /// Execute with an injected configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        init_logging(config.log_level.as_deref());

        match self.command {
            Commands::Heal(cmd) => cmd.execute(&config).await,
            Commands::Render(cmd) => cmd.execute(&config).await,
            Commands::Fill(cmd) => cmd.execute(&config).await,
            Commands::Markers(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Only the first call has an effect, so repeated in-process executions
/// (as in tests) keep the first filter.
fn init_logging(level: Option<&str>) {
    let Some(level) = level else {
        return;
    };

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
