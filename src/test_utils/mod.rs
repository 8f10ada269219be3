//! Test utilities for docfill
//!
//! This module provides helpers shared by unit tests and the integration test
//! suite: one-time logging initialisation and fixtures for fragmented
//! WordprocessingML and zip containers.
//!
//! # Example
//!
//! ```rust,ignore
//! use docfill::test_utils::{fixtures, init_test_logging};
//!
//! init_test_logging(None);
//! let paragraph = fixtures::paragraph(&["Dear {cust", "omer}"]);
//! assert!(paragraph.starts_with("<w:p>"));
//! ```

pub mod fixtures;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=docfill=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
