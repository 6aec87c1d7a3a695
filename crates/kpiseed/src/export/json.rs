//! JSON output.
//!
//! The plan becomes a pretty-printed array, one entry per object in creation
//! order:
//!
//! ```json
//! [
//!   {
//!     "alias": "kpiTemp",
//!     "class": "KPI",
//!     "attributes": { "id_kpi": "temp001" },
//!     "dependencies": ["differdange"],
//!     "dependents": []
//!   }
//! ]
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use kpiseed_core::{identifier::Id, record::Literal};

use crate::plan::MaterializationPlan;

use super::{Error, Renderer};

/// Renders a plan as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

#[derive(Serialize)]
struct Entry<'a> {
    alias: Id,
    class: Id,
    attributes: &'a IndexMap<String, Literal>,
    dependencies: Vec<Id>,
    dependents: Vec<Id>,
}

impl Renderer for Json {
    fn render(&self, plan: &MaterializationPlan) -> Result<String, Error> {
        for object in plan {
            check_finite(object.alias(), object.attribute_map())?;
        }

        let entries: Vec<Entry<'_>> = plan
            .iter()
            .map(|object| Entry {
                alias: object.alias(),
                class: object.class_name(),
                attributes: object.attribute_map(),
                dependencies: plan.dependencies(object).map(|dep| dep.alias()).collect(),
                dependents: plan.dependents(object).map(|dep| dep.alias()).collect(),
            })
            .collect();

        let mut out = serde_json::to_string_pretty(&entries)?;
        out.push('\n');
        Ok(out)
    }
}

/// serde_json writes NaN and infinities as `null`, which would lose the value.
fn check_finite(alias: Id, attributes: &IndexMap<String, Literal>) -> Result<(), Error> {
    for (name, value) in attributes {
        if let Literal::Float(float) = value {
            if float.is_finite() {
                continue;
            }
            return Err(Error::Render(format!(
                "float value `{float}` of `{alias}.{name}` has no JSON literal"
            )));
        }
    }
    Ok(())
}
