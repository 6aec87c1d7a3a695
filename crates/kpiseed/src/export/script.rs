//! Seed script output.
//!
//! One constructor call per object, in creation order. Attribute values come
//! first as keyword arguments, followed by the aliases of the objects the
//! call depends on:
//!
//! ```text
//! differdange = City(name = "Differdange", population = 28000)
//!
//! kpiTemp = KPI(id_kpi = "temp001", active = True, differdange)
//! ```

use std::fmt::Write;

use kpiseed_core::record::Literal;

use crate::plan::MaterializationPlan;

use super::{Error, Renderer};

/// Renders a plan as a constructor-call script.
#[derive(Debug, Clone, Copy, Default)]
pub struct Script<'a> {
    prelude: Option<&'a str>,
}

impl<'a> Script<'a> {
    /// Creates a script renderer that writes `prelude` (if any) before the
    /// first statement.
    pub fn new(prelude: Option<&'a str>) -> Self {
        Self { prelude }
    }
}

impl Renderer for Script<'_> {
    fn render(&self, plan: &MaterializationPlan) -> Result<String, Error> {
        let mut statements = Vec::with_capacity(plan.len() + 1);
        if let Some(prelude) = self.prelude {
            statements.push(prelude.trim_end().to_string());
        }

        for object in plan {
            let mut arguments = Vec::new();
            for (name, value) in object.attribute_map() {
                arguments.push(format!("{name} = {}", literal(value)?));
            }
            for dependency in plan.dependencies(object) {
                arguments.push(dependency.alias().to_string());
            }
            statements.push(format!(
                "{} = {}({})",
                object.alias(),
                object.class_name(),
                arguments.join(", ")
            ));
        }

        let mut out = statements.join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }
}

fn literal(value: &Literal) -> Result<String, Error> {
    Ok(match value {
        Literal::Boolean(true) => "True".to_string(),
        Literal::Boolean(false) => "False".to_string(),
        Literal::Integer(value) => value.to_string(),
        Literal::Float(float) if !float.is_finite() => {
            return Err(Error::Render(format!(
                "float value `{float}` has no script literal"
            )));
        }
        Literal::Float(float) => format!("{float:?}"),
        Literal::String(value) => quote(value)?,
    })
}

fn quote(value: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.write_char(c)?,
        }
    }
    out.push('"');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use kpiseed_core::record::{ObjectRecord, RelationshipRecord};

    use super::*;
    use crate::plan::{PlanOptions, materialize};

    fn plan(
        objects: &[ObjectRecord],
        relationships: &[RelationshipRecord],
    ) -> MaterializationPlan {
        materialize(objects, relationships, &PlanOptions::default()).unwrap()
    }

    #[test]
    fn test_script_statements() {
        let objects = [
            ObjectRecord::new("kpiTemp", "KPI")
                .with_attribute("id_kpi", "temp001")
                .with_attribute("minThreshold", 15.0)
                .with_attribute("active", true),
            ObjectRecord::new("differdange", "City")
                .with_attribute("name", "Differdange")
                .with_attribute("population", 28000),
        ];
        let plan = plan(&objects, &[RelationshipRecord::new("kpiTemp", "differdange")]);

        let text = Script::default().render(&plan).unwrap();
        assert_eq!(
            text,
            "differdange = City(name = \"Differdange\", population = 28000)\n\
             \n\
             kpiTemp = KPI(id_kpi = \"temp001\", minThreshold = 15.0, active = True, differdange)\n"
        );
    }

    #[test]
    fn test_prelude_comes_first() {
        let objects = [ObjectRecord::new("athens", "City")];
        let plan = plan(&objects, &[]);

        let text = Script::new(Some("from classes import *\n"))
            .render(&plan)
            .unwrap();
        assert_eq!(text, "from classes import *\n\nathens = City()\n");
    }

    #[test]
    fn test_duplicate_attributes_use_last_value() {
        let objects = [ObjectRecord::new("kpi", "KPI")
            .with_attribute("unitText", "Kg")
            .with_attribute("unitText", "Tons")];
        let plan = plan(&objects, &[]);

        let text = Script::default().render(&plan).unwrap();
        assert_eq!(text, "kpi = KPI(unitText = \"Tons\")\n");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            quote("say \"hi\"\n\tC:\\temp\r").unwrap(),
            r#""say \"hi\"\n\tC:\\temp\r""#
        );
        assert_eq!(literal(&Literal::Boolean(false)).unwrap(), "False");
        assert_eq!(literal(&Literal::Integer(-3)).unwrap(), "-3");
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let err = literal(&Literal::Float(f64::NAN)).unwrap_err();

        assert!(matches!(err, Error::Render(_)));
    }
}
