//! The ManifestError type for wrapping diagnostics.
//!
//! [`ManifestError`] wraps one or more [`Diagnostic`]s produced while
//! loading a manifest or while ordering the objects it declares.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// Error type for manifest loading and located planning failures.
#[derive(Debug)]
pub struct ManifestError {
    diagnostics: Vec<Diagnostic>,
}

impl ManifestError {
    /// Create a new manifest error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic carries the given code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|diag| diag.code() == Some(code))
    }
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ManifestError {}

impl From<Diagnostic> for ManifestError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ManifestError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E201);
        let err: ManifestError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert!(err.has_code(ErrorCode::E201));
        assert!(!err.has_code(ErrorCode::E300));
    }

    #[test]
    fn test_manifest_error_display_single() {
        let err: ManifestError = Diagnostic::error("blank alias").into();

        assert_eq!(err.to_string(), "error: blank alias");
    }

    #[test]
    fn test_manifest_error_display_multiple() {
        let diags = vec![
            Diagnostic::error("first error").with_code(ErrorCode::E100),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ];
        let err: ManifestError = diags.into();

        assert_eq!(err.to_string(), "error[E100]: first error (+2 more)");
    }
}
