//! Configuration types for kpiseed planning and export.
//!
//! This module provides configuration structures that control how plans are
//! built and rendered. All types implement [`serde::Deserialize`] for
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining plan and export settings.
//! - [`PlanConfig`] - Controls how [`materialize`](crate::plan::materialize) treats the input.
//! - [`ExportConfig`] - Controls the default [`ExportFormat`] and script output.
//!
//! # Example
//!
//! ```
//! # use kpiseed::config::AppConfig;
//! # use kpiseed::export::ExportFormat;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [plan]
//!     duplicate_attributes = "reject"
//!
//!     [export]
//!     format = "script"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.export().format(), ExportFormat::Script);
//! ```

use serde::Deserialize;

use crate::{
    export::ExportFormat,
    plan::{AttributePolicy, PlanOptions},
};

/// Top-level application configuration combining plan and export settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Plan configuration section.
    #[serde(default)]
    plan: PlanConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified plan and export configurations.
    pub fn new(plan: PlanConfig, export: ExportConfig) -> Self {
        Self { plan, export }
    }

    /// Returns the plan configuration.
    pub fn plan(&self) -> &PlanConfig {
        &self.plan
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Planning configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    /// What to do when one object assigns the same attribute twice.
    #[serde(default)]
    duplicate_attributes: AttributePolicy,
}

impl PlanConfig {
    pub fn new(duplicate_attributes: AttributePolicy) -> Self {
        Self {
            duplicate_attributes,
        }
    }

    pub fn duplicate_attributes(&self) -> AttributePolicy {
        self.duplicate_attributes
    }

    /// Returns the [`PlanOptions`] described by this section.
    pub fn options(&self) -> PlanOptions {
        PlanOptions::new().with_duplicate_attributes(self.duplicate_attributes)
    }
}

/// Export configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Default [`ExportFormat`] when none is requested explicitly.
    #[serde(default)]
    format: ExportFormat,

    /// Lines written before the first statement of a seed script.
    #[serde(default)]
    script_prelude: Option<String>,
}

impl ExportConfig {
    pub fn new(format: ExportFormat, script_prelude: Option<String>) -> Self {
        Self {
            format,
            script_prelude,
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn script_prelude(&self) -> Option<&str> {
        self.script_prelude.as_deref()
    }
}
