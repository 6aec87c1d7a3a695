//! The core diagnostic type for the kpiseed error system.

use std::fmt;

use crate::{
    error::{ErrorCode, Severity},
    span::Span,
};

/// A span of manifest text with a short note attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for the label marking the offending entry itself.
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// A problem found in a manifest, located by the entries it concerns.
///
/// # Example
///
/// ```text
/// error[E201]: relationship target `ghostCity` is not declared by any object
///   --> differdange.toml:14:10
///    |
/// 14 | target = "ghostCity"
///    |          ^^^^^^^^^^^ not declared by any object
///    |
///    = help: declare an `[[object]]` with this alias or fix the reference
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use kpiseed_manifest::error::{Diagnostic, ErrorCode};
    /// # use kpiseed_manifest::Span;
    ///
    /// let diag = Diagnostic::error("relationship references undeclared alias `city9`")
    ///     .with_code(ErrorCode::E201)
    ///     .with_label(Span::new(0..7), "not declared by any object");
    /// assert!(diag.severity().is_error());
    /// assert_eq!(diag.primary_span(), Some(Span::new(0..7)));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Span of the first primary label, if the diagnostic is located.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.primary)
            .map(Label::span)
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Marks the offending entry.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message, true)
    }

    /// Marks an entry that explains the offending one, such as its first
    /// declaration.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message, false)
    }

    /// Marks a sequence of entries, such as the steps of a dependency cycle.
    ///
    /// The first entry becomes the primary label unless the diagnostic
    /// already has one.
    pub fn with_label_chain<M>(mut self, chain: impl IntoIterator<Item = (Span, M)>) -> Self
    where
        M: Into<String>,
    {
        for (span, message) in chain {
            let primary = self.primary_span().is_none();
            self = self.push_label(span, message, primary);
        }
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    fn push_label(mut self, span: Span, message: impl Into<String>, primary: bool) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
            primary,
        });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_defaults() {
        let diag = Diagnostic::error("test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.primary_span().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("alias `sofia` is declared more than once")
            .with_code(ErrorCode::E200)
            .with_secondary_label(Span::new(50..57), "first declared here")
            .with_label(Span::new(100..107), "duplicate declaration")
            .with_help("rename one of the objects");

        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert_eq!(diag.labels().len(), 2);
        assert!(!diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_primary());
        assert_eq!(diag.primary_span(), Some(Span::new(100..107)));
        assert_eq!(diag.help(), Some("rename one of the objects"));
    }

    #[test]
    fn test_label_chain_marks_first_step_primary() {
        let diag = Diagnostic::error("dependency cycle").with_label_chain([
            (Span::new(10..20), "`a` depends on `b`"),
            (Span::new(30..40), "`b` depends on `a`"),
        ]);

        let primary: Vec<bool> = diag.labels().iter().map(Label::is_primary).collect();
        assert_eq!(primary, [true, false]);
        assert_eq!(diag.labels()[1].message(), "`b` depends on `a`");
    }

    #[test]
    fn test_label_chain_keeps_existing_primary() {
        let diag = Diagnostic::error("dependency cycle")
            .with_label(Span::new(0..5), "here")
            .with_label_chain([(Span::new(10..20), "step")]);

        assert_eq!(diag.primary_span(), Some(Span::new(0..5)));
        assert!(!diag.labels()[1].is_primary());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("dependency cycle").with_code(ErrorCode::E300);

        assert_eq!(diag.to_string(), "error[E300]: dependency cycle");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("object has no attributes");

        assert_eq!(diag.to_string(), "warning: object has no attributes");
    }
}
