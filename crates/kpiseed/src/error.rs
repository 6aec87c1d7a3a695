//! Error types for kpiseed operations.
//!
//! This module provides the main error type [`KpiseedError`] which wraps
//! the error conditions that can occur while loading, planning and
//! rendering seed data.

use std::io;

use thiserror::Error;

use kpiseed_manifest::error::ManifestError;

use crate::plan::PlanError;

/// The main error type for kpiseed operations.
///
/// # Diagnostic Variants
///
/// The `Manifest` variant contains structured error information with source
/// spans, together with the manifest text the spans point into. Planning
/// failures on manifests loaded from text are reported through it as well.
#[derive(Debug, Error)]
pub enum KpiseedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Manifest { err: ManifestError, src: String },

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for KpiseedError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl KpiseedError {
    /// Create a new `Manifest` error with the associated source text.
    pub fn new_manifest_error(err: impl Into<ManifestError>, src: impl Into<String>) -> Self {
        Self::Manifest {
            err: err.into(),
            src: src.into(),
        }
    }
}
