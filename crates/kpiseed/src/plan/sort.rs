//! Topological ordering of aliases.
//!
//! Kahn's algorithm run on the dependents direction: nodes that depend on
//! nothing are emitted first, and emitting a node releases the nodes that
//! referenced it. The result lists every dependency before the objects that
//! reference it, which is the order in which seed objects can be created.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
};

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use kpiseed_core::{identifier::Id, record::RelationshipRecord};

use super::graph::DependencyGraph;

/// The relationships contain a cycle; no materialization order exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependency cycle detected: {}", CyclePath(.cycle))]
pub struct CycleError {
    cycle: Vec<Id>,
    unordered: Vec<Id>,
}

impl CycleError {
    /// One concrete cycle, following dependency edges.
    ///
    /// Each alias depends on the next one and the last depends on the first.
    /// A self-reference yields a single-element cycle.
    pub fn cycle(&self) -> &[Id] {
        &self.cycle
    }

    /// Every alias that could not be ordered, in first-appearance order.
    ///
    /// This includes the cycle members and everything that depends on them,
    /// directly or transitively.
    pub fn unordered(&self) -> &[Id] {
        &self.unordered
    }
}

struct CyclePath<'a>(&'a [Id]);

impl fmt::Display for CyclePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.0 {
            write!(f, "{id} -> ")?;
        }
        match self.0.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// Orders every alias named by `relationships` so that targets precede the
/// sources referencing them.
///
/// Aliases that appear in no relationship are not part of the result.
/// Among aliases that become ready at the same time, the one first seen in
/// the relationship list (source before target) comes first; callers should
/// only rely on dependencies preceding their dependents.
///
/// # Errors
///
/// Returns [`CycleError`] if the relationships contain a cycle, including a
/// relationship whose source and target are the same alias.
///
/// # Examples
///
/// ```
/// use kpiseed::plan::topological_order;
/// use kpiseed_core::record::RelationshipRecord;
///
/// let order = topological_order(&[
///     RelationshipRecord::new("viz1", "kpi1"),
///     RelationshipRecord::new("kpi1", "city1"),
/// ])
/// .unwrap();
///
/// assert_eq!(order, ["city1", "kpi1", "viz1"]);
/// ```
pub fn topological_order(relationships: &[RelationshipRecord]) -> Result<Vec<Id>, CycleError> {
    let graph = DependencyGraph::from_relationships(relationships);
    order_graph(&graph)
}

/// Orders the nodes of an already built graph. See [`topological_order`].
pub fn order_graph(graph: &DependencyGraph) -> Result<Vec<Id>, CycleError> {
    debug!(
        nodes = graph.nodes_count(),
        edges = graph.edges_count();
        "Ordering dependency graph"
    );

    let mut pending: IndexMap<Id, usize> = graph
        .nodes()
        .map(|id| (id, graph.dependency_count(id)))
        .collect();
    let mut queue: VecDeque<Id> = pending
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(id, _)| *id)
        .collect();

    let mut order = Vec::with_capacity(pending.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);
        for dependent in graph.dependents(id) {
            if let Some(count) = pending.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    if order.len() < pending.len() {
        let unordered: Vec<Id> = pending
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(id, _)| id)
            .collect();
        let cycle = find_cycle(graph, &unordered);
        debug!(
            ordered = order.len(),
            unordered = unordered.len(),
            cycle_len = cycle.len();
            "Dependency cycle detected"
        );
        return Err(CycleError { cycle, unordered });
    }

    trace!(order:?; "Topological order");
    Ok(order)
}

/// Walks dependency edges inside the unordered set until an alias repeats.
///
/// Every unordered alias still has an unreleased dependency, and that
/// dependency is itself unordered, so the walk always closes a loop.
fn find_cycle(graph: &DependencyGraph, unordered: &[Id]) -> Vec<Id> {
    let stuck: HashSet<Id> = unordered.iter().copied().collect();
    let mut path: Vec<Id> = Vec::new();
    let mut positions: HashMap<Id, usize> = HashMap::new();

    let Some(mut current) = unordered.first().copied() else {
        return path;
    };
    loop {
        if let Some(&start) = positions.get(&current) {
            return path.split_off(start);
        }
        positions.insert(current, path.len());
        path.push(current);

        match graph.dependencies(current).find(|dep| stuck.contains(dep)) {
            Some(next) => current = next,
            None => return path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rels(pairs: &[(&str, &str)]) -> Vec<RelationshipRecord> {
        pairs
            .iter()
            .map(|(source, target)| RelationshipRecord::new(*source, *target))
            .collect()
    }

    fn position(order: &[Id], alias: &str) -> usize {
        order
            .iter()
            .position(|id| *id == alias)
            .unwrap_or_else(|| panic!("{alias} missing from {order:?}"))
    }

    #[test]
    fn test_empty_input() {
        assert!(topological_order(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_dependency() {
        let order = topological_order(&rels(&[("Dashboard1", "City1")])).unwrap();

        assert_eq!(order, ["City1", "Dashboard1"]);
    }

    #[test]
    fn test_chain() {
        let order = topological_order(&rels(&[("KPI1", "City1"), ("Viz1", "KPI1")])).unwrap();

        assert_eq!(order, ["City1", "KPI1", "Viz1"]);
    }

    #[test]
    fn test_shared_target_precedes_both_sources() {
        let order = topological_order(&rels(&[("A", "C"), ("B", "C")])).unwrap();

        assert_eq!(order.len(), 3);
        assert!(position(&order, "C") < position(&order, "A"));
        assert!(position(&order, "C") < position(&order, "B"));
    }

    #[test]
    fn test_tie_break_follows_first_appearance() {
        // "x" and "y" are both ready at the start; "x" was seen first.
        let order = topological_order(&rels(&[("p", "x"), ("q", "y")])).unwrap();

        assert_eq!(order, ["x", "y", "p", "q"]);
    }

    #[test]
    fn test_multi_parent_is_not_a_cycle() {
        let order = topological_order(&rels(&[
            ("viz", "kpi"),
            ("viz", "dashboard"),
            ("kpi", "city"),
            ("dashboard", "city"),
        ]))
        .unwrap();

        assert_eq!(order.first().copied(), Some(Id::new("city")));
        assert_eq!(order.last().copied(), Some(Id::new("viz")));
    }

    #[test]
    fn test_repeated_relationship() {
        let order = topological_order(&rels(&[("a", "b"), ("a", "b")])).unwrap();

        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn test_two_node_cycle() {
        let err = topological_order(&rels(&[("A", "B"), ("B", "A")])).unwrap_err();

        assert_eq!(err.cycle(), ["A", "B"]);
        assert_eq!(err.unordered(), ["A", "B"]);
        assert_eq!(err.to_string(), "dependency cycle detected: A -> B -> A");
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let err = topological_order(&rels(&[("kpi", "city"), ("kpi", "kpi")])).unwrap_err();

        assert_eq!(err.cycle(), ["kpi"]);
        assert_eq!(err.unordered(), ["kpi"]);
    }

    #[test]
    fn test_dependents_of_a_cycle_are_unordered() {
        let err = topological_order(&rels(&[
            ("dashboard", "viz"),
            ("viz", "kpi"),
            ("kpi", "viz"),
            ("kpi", "city"),
        ]))
        .unwrap_err();

        assert_eq!(err.unordered(), ["dashboard", "viz", "kpi"]);
        assert_eq!(err.cycle(), ["viz", "kpi"]);
    }
}
