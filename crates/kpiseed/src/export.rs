//! Text renderings of a materialization plan.
//!
//! This is the last stage of the kpiseed pipeline:
//!
//! ```text
//! Manifest (TOML)
//!     ↓ load
//! Object and relationship records
//!     ↓ plan
//! MaterializationPlan
//!     ↓ export (this module)
//! Listing, seed script or JSON
//! ```
//!
//! # Available Formats
//!
//! - [`ExportFormat::Plan`]: numbered creation order, see [`listing`]
//! - [`ExportFormat::Script`]: constructor-call seed script, see [`script`]
//! - [`ExportFormat::Json`]: machine-readable plan, see [`json`]
//!
//! # Error Handling
//!
//! Renderers return [`Error`], which converts into
//! [`KpiseedError::Export`] at the crate boundary.
//!
//! [`KpiseedError::Export`]: crate::KpiseedError::Export

pub mod json;
pub mod listing;
pub mod script;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::Deserialize;

use crate::{config::ExportConfig, plan::MaterializationPlan};

/// Output formats for a plan.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Numbered listing of the creation order (default)
    #[default]
    Plan,
    /// Seed script with one constructor call per object
    Script,
    /// Pretty-printed JSON array
    Json,
}

impl FromStr for ExportFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plan" => Ok(Self::Plan),
            "script" => Ok(Self::Script),
            "json" => Ok(Self::Json),
            _ => Err("Unsupported export format"),
        }
    }
}

impl From<ExportFormat> for &'static str {
    fn from(val: ExportFormat) -> Self {
        match val {
            ExportFormat::Plan => "plan",
            ExportFormat::Script => "script",
            ExportFormat::Json => "json",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Abstraction over plan output formats.
pub trait Renderer {
    /// Renders the whole plan as text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the plan cannot be represented in the
    /// target format, or [`Error::Json`] if JSON serialization fails.
    fn render(&self, plan: &MaterializationPlan) -> Result<String, Error>;
}

/// Renders `plan` in the requested `format`.
///
/// # Errors
///
/// Propagates the renderer's [`Error`].
pub fn render(
    plan: &MaterializationPlan,
    format: ExportFormat,
    config: &ExportConfig,
) -> Result<String, Error> {
    match format {
        ExportFormat::Plan => listing::Listing.render(plan),
        ExportFormat::Script => script::Script::new(config.script_prelude()).render(plan),
        ExportFormat::Json => json::Json.render(plan),
    }
}

/// Errors that can occur while rendering a plan.
///
/// This type is converted into [`KpiseedError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`KpiseedError::Export`]: crate::KpiseedError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// A JSON serialization failure.
    Json(serde_json::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("plan".parse::<ExportFormat>(), Ok(ExportFormat::Plan));
        assert_eq!("Script".parse::<ExportFormat>(), Ok(ExportFormat::Script));
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("sql".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in [ExportFormat::Plan, ExportFormat::Script, ExportFormat::Json] {
            assert_eq!(format.to_string().parse::<ExportFormat>(), Ok(format));
        }
        assert_eq!(ExportFormat::default(), ExportFormat::Plan);
    }

    #[test]
    fn test_error_display() {
        let err = Error::Render("bad".to_string());
        assert_eq!(err.to_string(), "Render error: bad");
        assert!(std::error::Error::source(&err).is_none());
    }
}
