//! Integration test suite for docfill
//!
//! End-to-end tests that run the `docfill` binary against files in a
//! temporary directory, plus tests of the packaging layer through the public
//! library API.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **heal**: `docfill heal` on files and stdin
//! - **render**: `docfill render` with JSON, YAML and TOML data
//! - **fill**: `docfill fill` on zip containers
//! - **markers**: `docfill markers` listing and data checks
//! - **config**: `docfill.toml` discovery and overrides
//! - **error_scenarios**: user-facing error messages and exit codes

mod common;

mod config;
mod error_scenarios;
mod fill;
mod heal;
mod markers;
mod render;
