//! Error handling for docfill.
//!
//! The healing and rendering engine never fails; every error in this module
//! comes from the layers around it: reading data files, loading
//! configuration, and opening or writing containers.
//!
//! - [`FillError`] enumerates those failures for precise matching in code.
//! - [`ErrorContext`] wraps an error with a suggestion and details for display
//!   in the terminal.
//! - [`user_friendly_error`] turns any [`anyhow::Error`] into an
//!   [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use docfill::core::{FillError, ErrorContext};
//!
//! let ctx = ErrorContext::new(FillError::FileNotFound {
//!     path: "data.json".to_string(),
//! })
//! .with_suggestion("Check the path passed to --data");
//!
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for docfill operations.
#[derive(Error, Debug, Clone)]
pub enum FillError {
    /// An input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The missing path
        path: String,
    },

    /// A data file parsed, but its root is not a mapping, or it did not parse
    /// at all.
    #[error("Invalid template data in {source_name}: {reason}")]
    InvalidData {
        /// File name or `<stdin>`
        source_name: String,
        /// What was wrong with it
        reason: String,
    },

    /// The data file extension is not one of the supported formats.
    #[error("Unsupported data format for {path}")]
    UnsupportedDataFormat {
        /// The offending path
        path: String,
    },

    /// `docfill.toml` could not be parsed or contains invalid values.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A selected container part is not valid UTF-8.
    #[error("Part '{part}' is not valid UTF-8")]
    PartEncoding {
        /// Name of the entry inside the container
        part: String,
    },

    /// No entry in the container matched the configured part patterns.
    #[error("No fillable parts found in {path}")]
    PartNotFound {
        /// The container path
        path: String,
    },

    /// The container could not be read or written.
    #[error("Package error in {path}: {reason}")]
    PackageError {
        /// The container path
        path: String,
        /// The underlying zip error
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error during {operation} on {path}")]
    Io {
        /// What was being done
        operation: String,
        /// Where
        path: String,
    },

    /// Any other failure, with its cause chain.
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying user-facing guidance.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: FillError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: FillError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    ///
    /// Details are displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for display.
///
/// Known [`FillError`] variants get tailored suggestions; I/O and TOML
/// errors are recognised by type; everything else is shown with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(fill_error) = error.downcast_ref::<FillError>() {
        return create_error_context(fill_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let ctx = ErrorContext::new(FillError::Io {
            operation: "file access".to_string(),
            path: "unknown".to_string(),
        });
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ctx
                .with_suggestion("Check that the file exists and the path is correct")
                .with_details(io_error.to_string()),
            std::io::ErrorKind::PermissionDenied => ctx
                .with_suggestion("Check file ownership and permissions")
                .with_details(io_error.to_string()),
            _ => ctx.with_details(io_error.to_string()),
        };
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(FillError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and key names");
    }

    ErrorContext::new(FillError::Other {
        message: format_chain(&error),
    })
}

fn create_error_context(error: FillError) -> ErrorContext {
    match &error {
        FillError::FileNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the path; use '-' to read the XML part from stdin"),
        FillError::InvalidData {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("The data file must contain a mapping at its root, e.g. {\"name\": \"value\"}"),
        FillError::UnsupportedDataFormat {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use a .json, .yaml, .yml or .toml data file"),
        FillError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check docfill.toml against the documented keys")
            .with_details("Known keys: parts, cleanup_tags, transparent_tags, max_sections, max_depth"),
        FillError::PartEncoding {
            ..
        } => ErrorContext::new(error)
            .with_details("Only UTF-8 encoded XML parts can be filled"),
        FillError::PartNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Adjust the 'parts' patterns in docfill.toml to match entries in the container"),
        FillError::PackageError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure the input is a valid zip-based document (.docx, .odt, ...)"),
        FillError::Io {
            ..
        }
        | FillError::Other {
            ..
        } => ErrorContext::new(error),
    }
}

fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}
