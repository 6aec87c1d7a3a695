//! Error adapter for converting KpiseedError to miette diagnostics.
//!
//! This module provides the bridge between the library's error types and
//! miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! Manifest loading collects every structural problem before failing, so a
//! [`ManifestError`](kpiseed_manifest::error::ManifestError) may carry
//! several diagnostics. Each one is rendered independently.

use std::{cmp::Reverse, fmt};

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceSpan,
};

use kpiseed::KpiseedError;
use kpiseed_manifest::{Span, error::Diagnostic};

/// Adapter for a single manifest diagnostic.
///
/// Wraps a [`Diagnostic`] together with the manifest text its labels point
/// into.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        if self.diag.severity().is_warning() {
            Some(Severity::Warning)
        } else {
            Some(Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`KpiseedError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a KpiseedError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match &self.0 {
            KpiseedError::Io(_) => Box::new("kpiseed::io"),
            KpiseedError::Manifest { .. } => return None,
            KpiseedError::Plan(err) => Box::new(err.code()),
            KpiseedError::Config(_) => Box::new("kpiseed::config"),
            KpiseedError::Export(_) => Box::new("kpiseed::export"),
        };
        Some(code)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: Box<dyn fmt::Display> = match &self.0 {
            KpiseedError::Io(_) => Box::new("check that the input and output paths are accessible"),
            KpiseedError::Config(_) => Box::new(
                "check the `[plan]` and `[export]` sections of the configuration file",
            ),
            KpiseedError::Plan(err) => Box::new(err.code().description()),
            KpiseedError::Export(_) => Box::new("choose another format with `--format`"),
            KpiseedError::Manifest { .. } => return None,
        };
        Some(help)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a manifest [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`KpiseedError`] into a list of reportable errors.
///
/// For [`KpiseedError::Manifest`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &KpiseedError) -> Vec<Reportable<'_>> {
    match err {
        KpiseedError::Manifest {
            err: manifest_err,
            src,
        } => manifest_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Renders every reportable of `err` with `handler`, errors first.
pub fn render_reports(
    err: &KpiseedError,
    handler: &GraphicalReportHandler,
) -> Vec<(Severity, String)> {
    let mut reports: Vec<(Severity, String)> = to_reportables(err)
        .iter()
        .map(|reportable| {
            let severity = reportable.severity().unwrap_or(Severity::Error);
            let mut out = String::new();
            if handler.render_report(&mut out, reportable).is_err() {
                out = reportable.to_string();
            }
            (severity, out)
        })
        .collect();
    reports.sort_by_key(|(severity, _)| Reverse(*severity));
    reports
}
