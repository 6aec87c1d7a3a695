//! Error and diagnostic system for kpiseed manifests.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in
//! [`ManifestError`] for returning from loading or planning.
//!
//! # Example
//!
//! ```
//! # use kpiseed_manifest::error::{Diagnostic, ErrorCode};
//! # use kpiseed_manifest::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::error("alias `torino` is declared more than once")
//!     .with_code(ErrorCode::E200)
//!     .with_label(span, "duplicate declaration")
//!     .with_secondary_label(original_span, "first declared here")
//!     .with_help("rename one of the objects");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod manifest_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use manifest_error::ManifestError;
pub use severity::Severity;
