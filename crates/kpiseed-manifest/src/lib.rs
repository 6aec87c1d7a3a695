//! # kpiseed Manifest
//!
//! Loader for object-diagram manifests. A manifest declares the object
//! instances to seed (cities, KPIs, KPI values, dashboards, ...) and the
//! relationships between them; this crate turns the TOML text into
//! [`kpiseed_core::record`] values plus a [`SourceMap`] for diagnostics.
//!
//! ## Usage
//!
//! ```
//! # use kpiseed_manifest::{load, error::ManifestError};
//!
//! fn main() -> Result<(), ManifestError> {
//!     let source = r#"
//!         [[object]]
//!         alias = "sofia"
//!         class = "City"
//!         attributes = [{ name = "name", value = "Sofia" }]
//!
//!         [[object]]
//!         alias = "kpiTraffic"
//!         class = "KPI"
//!
//!         [[relationship]]
//!         source = "kpiTraffic"
//!         target = "sofia"
//!     "#;
//!
//!     let manifest = load(source)?;
//!     assert_eq!(manifest.objects().len(), 2);
//!     assert_eq!(manifest.relationships().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;

mod loader;
mod manifest;
mod span;

pub use loader::load;
pub use manifest::{Manifest, ObjectSpans, RelationshipSpans, SourceMap};
pub use span::Span;
