//! Collector for accumulating diagnostics during a processing phase.
//!
//! The [`DiagnosticCollector`] lets a check report every problem it finds in
//! a manifest instead of stopping at the first one.

use crate::error::{Diagnostic, ManifestError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if at least one error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ManifestError)` with all diagnostics.
    /// - If there are no errors, returns the warnings (possibly empty).
    pub fn finish(self) -> Result<Vec<Diagnostic>, ManifestError> {
        if self.has_errors {
            Err(ManifestError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
