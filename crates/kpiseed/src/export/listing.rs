//! Numbered creation-order listing.
//!
//! ```text
//! 1. differdange: City
//! 2. kpiTemp_Differdange: KPI <- differdange
//! 3. dashboard: Dashboard <- differdange, kpiTemp_Differdange
//! ```

use std::fmt::Write;

use crate::plan::MaterializationPlan;

use super::{Error, Renderer};

/// Renders one line per object, numbered from 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Listing;

impl Renderer for Listing {
    fn render(&self, plan: &MaterializationPlan) -> Result<String, Error> {
        let mut out = String::new();
        for (index, object) in plan.iter().enumerate() {
            write!(out, "{}. {}: {}", index + 1, object.alias(), object.class_name())?;

            let mut dependencies = plan.dependencies(object).peekable();
            if dependencies.peek().is_some() {
                out.push_str(" <-");
                for (n, dependency) in dependencies.enumerate() {
                    let separator = if n == 0 { " " } else { ", " };
                    write!(out, "{separator}{}", dependency.alias())?;
                }
            }
            out.push('\n');
        }
        Ok(out)
    }
}
