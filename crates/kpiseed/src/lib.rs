//! kpiseed - Dependency-ordered seed data for municipal KPI object diagrams.
//!
//! Loads an object diagram (cities, KPIs, KPI values, dashboards and the
//! references between them), computes the order in which the objects can be
//! created so that every object exists before anything that references it,
//! and renders that plan as a listing, a seed script or JSON.

pub mod config;
pub mod export;
pub mod plan;

mod error;

pub use kpiseed_core::{identifier, record};
pub use kpiseed_manifest::Manifest;

pub use error::KpiseedError;

use log::{debug, info, trace, warn};

use kpiseed_core::record::{ObjectRecord, RelationshipRecord};

use config::AppConfig;
use export::ExportFormat;
use plan::MaterializationPlan;

/// Builder for loading, planning and rendering seed data.
///
/// This provides an API for processing object diagrams through the load,
/// plan and export stages.
///
/// # Examples
///
/// ```rust
/// use kpiseed::{SeedBuilder, config::AppConfig, export::ExportFormat};
///
/// let source = r#"
///     [[object]]
///     alias = "kpiTemp"
///     class = "KPI"
///
///     [[object]]
///     alias = "differdange"
///     class = "City"
///
///     [[relationship]]
///     source = "kpiTemp"
///     target = "differdange"
/// "#;
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = SeedBuilder::new(config);
///
/// // Load and order the objects
/// let plan = builder.plan(source)
///     .expect("Failed to plan");
///
/// // Render the plan
/// let listing = builder.render(&plan, ExportFormat::Plan)
///     .expect("Failed to render");
/// assert_eq!(listing, "1. differdange: City\n2. kpiTemp: KPI <- differdange\n");
///
/// // Or use default config
/// let builder = SeedBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct SeedBuilder {
    config: AppConfig,
}

impl SeedBuilder {
    /// Create a new seed builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including plan and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load manifest text into a [`Manifest`].
    ///
    /// # Errors
    ///
    /// Returns [`KpiseedError::Manifest`] for TOML errors and blank fields.
    pub fn load(&self, source: &str) -> Result<Manifest, KpiseedError> {
        info!("Loading manifest");

        let manifest = kpiseed_manifest::load(source)
            .map_err(|err| KpiseedError::new_manifest_error(err, source))?;

        debug!(
            objects = manifest.objects().len(),
            relationships = manifest.relationships().len(),
            warnings = manifest.warnings().len();
            "Manifest loaded"
        );
        for warning in manifest.warnings() {
            warn!(span:? = warning.primary_span(); "{warning}");
        }
        Ok(manifest)
    }

    /// Load manifest text and compute its materialization plan.
    ///
    /// Planning failures are reported as located diagnostics pointing into
    /// `source`, followed by any warnings raised while loading it.
    ///
    /// # Errors
    ///
    /// Returns [`KpiseedError::Manifest`] if the manifest cannot be loaded,
    /// declares an alias twice, references an undeclared alias, or contains
    /// a dependency cycle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kpiseed::{KpiseedError, SeedBuilder};
    ///
    /// let source = r#"
    ///     [[object]]
    ///     alias = "kpi"
    ///     class = "KPI"
    ///
    ///     [[relationship]]
    ///     source = "kpi"
    ///     target = "nowhere"
    /// "#;
    ///
    /// let err = SeedBuilder::default().plan(source).unwrap_err();
    /// assert!(matches!(err, KpiseedError::Manifest { .. }));
    /// ```
    pub fn plan(&self, source: &str) -> Result<MaterializationPlan, KpiseedError> {
        let manifest = self.load(source)?;

        plan::materialize(
            manifest.objects(),
            manifest.relationships(),
            &self.config.plan().options(),
        )
        .map_err(|err| {
            debug!(code:% = err.code(); "Planning failed");
            let diagnostics: Vec<_> = std::iter::once(plan::diagnose(&err, &manifest))
                .chain(manifest.warnings().iter().cloned())
                .collect();
            KpiseedError::new_manifest_error(diagnostics, source)
        })
    }

    /// Compute the materialization plan of in-memory records.
    ///
    /// # Errors
    ///
    /// Returns [`KpiseedError::Plan`] if the records fail validation or
    /// contain a dependency cycle.
    pub fn plan_records(
        &self,
        objects: &[ObjectRecord],
        relationships: &[RelationshipRecord],
    ) -> Result<MaterializationPlan, KpiseedError> {
        let plan = plan::materialize(objects, relationships, &self.config.plan().options())?;
        trace!(order:? = plan.order().collect::<Vec<_>>(); "Planned records");
        Ok(plan)
    }

    /// Render a plan in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`KpiseedError::Export`] if the plan cannot be rendered.
    pub fn render(
        &self,
        plan: &MaterializationPlan,
        format: ExportFormat,
    ) -> Result<String, KpiseedError> {
        info!(format:%, objects = plan.len(); "Rendering plan");
        let output = export::render(plan, format, self.config.export())?;
        debug!(bytes = output.len(); "Plan rendered");
        Ok(output)
    }
}
