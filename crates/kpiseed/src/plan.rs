//! Materialization planning.
//!
//! Turns declared objects and relationships into a [`MaterializationPlan`]:
//! every object, ordered so that each one is created after everything it
//! references.
//!
//! The pieces are usable on their own:
//!
//! - [`DependencyGraph`] and [`topological_order`] order aliases from
//!   relationships alone.
//! - [`materialize`] validates the records, orders them and links the
//!   resulting objects.
//! - [`diagnose`] turns a [`PlanError`] into a [`Diagnostic`] pointing at the
//!   manifest entries involved.
//!
//! [`Diagnostic`]: kpiseed_manifest::error::Diagnostic

mod diagnose;
mod error;
mod graph;
mod materialize;
mod sort;
mod validate;

pub use diagnose::diagnose;
pub use error::{Endpoint, PlanError};
pub use graph::DependencyGraph;
pub use materialize::{
    AttributePolicy, MaterializationPlan, MaterializedObject, PlanOptions, materialize,
};
pub use sort::{CycleError, order_graph, topological_order};
