//! Core types shared by the outer layers of docfill.
//!
//! The template engine itself is infallible. The error types here cover the
//! data, configuration, packaging and CLI layers:
//! - [`FillError`] - enumerated failure modes
//! - [`ErrorContext`] - user-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - convert any error to the user-friendly format

pub mod error;

pub use error::{ErrorContext, FillError, user_friendly_error};
