//! Utility modules
//!
//! - Diagnostics for content that will render in a degraded way
//! - Error types for the outer surfaces

pub mod diagnostics;
pub mod error;

pub use diagnostics::{
    check_content, check_content_with_options, format_diagnostics, CheckResult, Diagnostic,
    DiagnosticLevel,
};
pub use error::{RenderError, RenderResult};
