//! Materialization plans.
//!
//! A [`MaterializationPlan`] is the list of objects in the order they can be
//! created, with every object linked to the objects it references and the
//! objects referencing it. Objects live in a single arena owned by the plan
//! and link to each other by arena position, so the input records are never
//! touched.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace};
use serde::Deserialize;

use kpiseed_core::{
    identifier::Id,
    record::{Attribute, Literal, ObjectRecord, RelationshipRecord},
};

use super::{error::PlanError, graph::DependencyGraph, sort, validate};

/// How repeated attribute names on one object are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributePolicy {
    /// The last assignment wins in the attribute map.
    #[default]
    LastWins,
    /// Planning fails with [`PlanError::DuplicateAttribute`].
    Reject,
}

/// Options controlling [`materialize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    duplicate_attributes: AttributePolicy,
}

impl PlanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_attributes(mut self, policy: AttributePolicy) -> Self {
        self.duplicate_attributes = policy;
        self
    }

    pub fn duplicate_attributes(&self) -> AttributePolicy {
        self.duplicate_attributes
    }
}

/// One object in a plan, together with its links.
#[derive(Debug, Clone)]
pub struct MaterializedObject {
    record: ObjectRecord,
    attribute_map: IndexMap<String, Literal>,
    dependencies: Vec<usize>,
    dependents: Vec<usize>,
}

impl MaterializedObject {
    fn new(record: ObjectRecord) -> Self {
        let attribute_map = record
            .attributes()
            .iter()
            .map(|attr| (attr.name().to_string(), attr.value().clone()))
            .collect();
        Self {
            record,
            attribute_map,
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }

    /// The record this object was built from.
    pub fn record(&self) -> &ObjectRecord {
        &self.record
    }

    pub fn alias(&self) -> Id {
        self.record.alias()
    }

    pub fn class_name(&self) -> Id {
        self.record.class_name()
    }

    /// Attribute assignments exactly as declared, duplicates included.
    pub fn attributes(&self) -> &[Attribute] {
        self.record.attributes()
    }

    /// Attribute values by name, in first-declaration order.
    ///
    /// A name assigned more than once maps to its last value.
    pub fn attribute_map(&self) -> &IndexMap<String, Literal> {
        &self.attribute_map
    }

    pub fn attribute(&self, name: &str) -> Option<&Literal> {
        self.attribute_map.get(name)
    }

    /// Plan positions of the objects this one references.
    pub fn dependency_positions(&self) -> &[usize] {
        &self.dependencies
    }

    /// Plan positions of the objects referencing this one.
    pub fn dependent_positions(&self) -> &[usize] {
        &self.dependents
    }

    /// Returns `true` if no relationship mentions this object.
    pub fn is_isolated(&self) -> bool {
        self.dependencies.is_empty() && self.dependents.is_empty()
    }
}

/// Objects in an order where every object comes after all objects it
/// references.
///
/// Objects that take part in a relationship come first, in dependency
/// order. Objects no relationship mentions follow in declaration order.
#[derive(Debug, Clone, Default)]
pub struct MaterializationPlan {
    objects: Vec<MaterializedObject>,
    positions: HashMap<Id, usize>,
}

impl MaterializationPlan {
    /// All objects in creation order.
    pub fn objects(&self) -> &[MaterializedObject] {
        &self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaterializedObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Looks up an object by alias.
    pub fn get(&self, alias: impl Into<Id>) -> Option<&MaterializedObject> {
        self.position(alias).map(|pos| &self.objects[pos])
    }

    /// Position of an alias in creation order.
    pub fn position(&self, alias: impl Into<Id>) -> Option<usize> {
        self.positions.get(&alias.into()).copied()
    }

    /// Aliases in creation order.
    pub fn order(&self) -> impl Iterator<Item = Id> + '_ {
        self.objects.iter().map(MaterializedObject::alias)
    }

    /// Objects referenced by `object`, without repeats, in declaration order.
    pub fn dependencies<'a>(
        &'a self,
        object: &'a MaterializedObject,
    ) -> impl Iterator<Item = &'a MaterializedObject> + 'a {
        object.dependencies.iter().map(|pos| &self.objects[*pos])
    }

    /// Objects referencing `object`, without repeats, in declaration order.
    pub fn dependents<'a>(
        &'a self,
        object: &'a MaterializedObject,
    ) -> impl Iterator<Item = &'a MaterializedObject> + 'a {
        object.dependents.iter().map(|pos| &self.objects[*pos])
    }

    fn push(&mut self, record: ObjectRecord) -> usize {
        let pos = self.objects.len();
        self.positions.insert(record.alias(), pos);
        self.objects.push(MaterializedObject::new(record));
        pos
    }
}

impl<'a> IntoIterator for &'a MaterializationPlan {
    type Item = &'a MaterializedObject;
    type IntoIter = std::slice::Iter<'a, MaterializedObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Orders `objects` so that each one follows everything it references.
///
/// Input is checked before any ordering happens, in this order: repeated
/// aliases, relationships naming undeclared aliases, then (with
/// [`AttributePolicy::Reject`]) repeated attribute names. The first problem
/// found is returned.
///
/// # Errors
///
/// Returns [`PlanError`] if the input fails a check or the relationships
/// contain a cycle.
///
/// # Examples
///
/// ```
/// use kpiseed::plan::{PlanOptions, materialize};
/// use kpiseed_core::record::{ObjectRecord, RelationshipRecord};
///
/// let objects = [
///     ObjectRecord::new("kpiTemp", "KPI").with_attribute("unitText", "C"),
///     ObjectRecord::new("differdange", "City").with_attribute("name", "Differdange"),
/// ];
/// let relationships = [RelationshipRecord::new("kpiTemp", "differdange")];
///
/// let plan = materialize(&objects, &relationships, &PlanOptions::default()).unwrap();
/// let order: Vec<_> = plan.order().collect();
/// assert_eq!(order, ["differdange", "kpiTemp"]);
/// ```
pub fn materialize(
    objects: &[ObjectRecord],
    relationships: &[RelationshipRecord],
    options: &PlanOptions,
) -> Result<MaterializationPlan, PlanError> {
    info!(
        objects = objects.len(),
        relationships = relationships.len();
        "Materializing objects"
    );

    let index = validate::index_aliases(objects)?;
    validate::check_references(relationships, &index)?;
    validate::check_attributes(objects, options.duplicate_attributes())?;

    let graph = DependencyGraph::from_relationships(relationships);
    let order = sort::order_graph(&graph)?;

    let mut plan = MaterializationPlan {
        objects: Vec::with_capacity(objects.len()),
        positions: HashMap::with_capacity(objects.len()),
    };
    for alias in &order {
        plan.push(objects[index[alias]].clone());
    }

    // Both link lists follow relationship declaration order.
    let mut dependencies = vec![IndexSet::new(); plan.len()];
    let mut dependents = vec![IndexSet::new(); plan.len()];
    for relationship in relationships {
        let (Some(source), Some(target)) = (
            plan.position(relationship.source()),
            plan.position(relationship.target()),
        ) else {
            continue;
        };
        dependencies[source].insert(target);
        dependents[target].insert(source);
    }
    for ((object, dependencies), dependents) in plan
        .objects
        .iter_mut()
        .zip(dependencies)
        .zip(dependents)
    {
        object.dependencies = dependencies.into_iter().collect();
        object.dependents = dependents.into_iter().collect();
    }

    let linked = plan.len();
    for object in objects {
        if !plan.positions.contains_key(&object.alias()) {
            trace!(alias:% = object.alias(); "Appending isolated object");
            plan.push(object.clone());
        }
    }

    debug!(
        linked,
        isolated = plan.len() - linked;
        "Materialization plan ready"
    );
    Ok(plan)
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    use super::*;

    /// Objects named `n0..nK` and relationships that only point from a
    /// higher index to a lower one, so the input is always acyclic.
    fn acyclic_input() -> impl Strategy<Value = (Vec<ObjectRecord>, Vec<RelationshipRecord>)> {
        (1usize..12)
            .prop_flat_map(|count| {
                let edges = prop::collection::vec((0..count, 0..count), 0..20);
                (Just(count), edges)
            })
            .prop_map(|(count, edges)| {
                let objects = (0..count)
                    .map(|i| ObjectRecord::new(format!("n{i}").as_str(), "Node"))
                    .collect();
                let relationships = edges
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| {
                        let (source, target) = (a.max(b), a.min(b));
                        RelationshipRecord::new(
                            format!("n{source}").as_str(),
                            format!("n{target}").as_str(),
                        )
                    })
                    .collect();
                (objects, relationships)
            })
    }

    fn check_every_object_once(
        objects: &[ObjectRecord],
        relationships: &[RelationshipRecord],
    ) -> Result<(), TestCaseError> {
        let plan = materialize(objects, relationships, &PlanOptions::default())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(plan.len(), objects.len());
        for object in objects {
            prop_assert!(plan.position(object.alias()).is_some());
        }
        Ok(())
    }

    fn check_relationships_respected(
        objects: &[ObjectRecord],
        relationships: &[RelationshipRecord],
    ) -> Result<(), TestCaseError> {
        let plan = materialize(objects, relationships, &PlanOptions::default())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        for relationship in relationships {
            let source = plan.position(relationship.source());
            let target = plan.position(relationship.target());
            prop_assert!(target < source, "{relationship} out of order");
        }
        Ok(())
    }

    /// An acyclic input together with a shuffled copy of its objects.
    fn shuffled_input()
    -> impl Strategy<Value = (Vec<ObjectRecord>, Vec<ObjectRecord>, Vec<RelationshipRecord>)> {
        acyclic_input().prop_flat_map(|(objects, relationships)| {
            (
                Just(objects.clone()),
                Just(objects).prop_shuffle(),
                Just(relationships),
            )
        })
    }

    type Links = HashMap<Id, (HashSet<Id>, HashSet<Id>)>;

    fn links(plan: &MaterializationPlan) -> Links {
        plan.iter()
            .map(|object| {
                let dependencies = plan.dependencies(object).map(|o| o.alias()).collect();
                let dependents = plan.dependents(object).map(|o| o.alias()).collect();
                (object.alias(), (dependencies, dependents))
            })
            .collect()
    }

    fn check_links_are_symmetric(
        objects: &[ObjectRecord],
        relationships: &[RelationshipRecord],
    ) -> Result<(), TestCaseError> {
        let plan = materialize(objects, relationships, &PlanOptions::default())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        for (pos, object) in plan.iter().enumerate() {
            for &dep in object.dependency_positions() {
                prop_assert!(dep < pos, "{} precedes a dependency", object.alias());
                prop_assert!(plan.objects()[dep].dependent_positions().contains(&pos));
            }
            for &dependent in object.dependent_positions() {
                prop_assert!(
                    plan.objects()[dependent]
                        .dependency_positions()
                        .contains(&pos)
                );
            }
        }
        Ok(())
    }

    fn check_object_order_does_not_change_links(
        objects: &[ObjectRecord],
        shuffled: &[ObjectRecord],
        relationships: &[RelationshipRecord],
    ) -> Result<(), TestCaseError> {
        let options = PlanOptions::default();
        let plan = materialize(objects, relationships, &options)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let reordered = materialize(shuffled, relationships, &options)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(plan.len(), reordered.len());
        prop_assert_eq!(links(&plan), links(&reordered));
        Ok(())
    }

    proptest! {
        #[test]
        fn links_are_symmetric((objects, relationships) in acyclic_input()) {
            check_links_are_symmetric(&objects, &relationships)?;
        }

        #[test]
        fn object_order_does_not_change_links(
            (objects, shuffled, relationships) in shuffled_input()
        ) {
            check_object_order_does_not_change_links(&objects, &shuffled, &relationships)?;
        }

        #[test]
        fn every_object_is_planned_once((objects, relationships) in acyclic_input()) {
            check_every_object_once(&objects, &relationships)?;
        }

        #[test]
        fn targets_precede_sources((objects, relationships) in acyclic_input()) {
            check_relationships_respected(&objects, &relationships)?;
        }
    }
}
