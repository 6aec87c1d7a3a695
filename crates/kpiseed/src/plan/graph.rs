//! Dependency graph over object aliases.
//!
//! Every [`RelationshipRecord`] becomes one directed edge `source -> target`,
//! read as "source depends on target". The graph tracks, per node, both the
//! edges leaving it (its dependencies) and the edges entering it (its
//! dependents), so the sorter can walk either direction in O(1) per edge.
//!
//! Nodes are kept in first-appearance order: for each relationship in input
//! order, the source is registered before the target. That order is the
//! tie-break the sorter uses among independent nodes.

use std::collections::HashMap;

use indexmap::IndexSet;

use kpiseed_core::{identifier::Id, record::RelationshipRecord};

/// Index of an edge in [`DependencyGraph`]'s edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeIndex(usize);

/// A directed `source -> target` edge.
#[derive(Debug, Clone, Copy)]
struct Edge {
    source: Id,
    target: Id,
}

/// Directed multigraph of "depends on" edges between aliases.
///
/// Repeated relationships produce parallel edges and self-references produce
/// self-loops; both are kept as declared.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: IndexSet<Id>,
    edges: Vec<Edge>,
    outgoing: HashMap<Id, Vec<EdgeIndex>>,
    incoming: HashMap<Id, Vec<EdgeIndex>>,
}

impl DependencyGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph with one edge per relationship.
    pub fn from_relationships(relationships: &[RelationshipRecord]) -> Self {
        let mut graph = Self::new();
        for relationship in relationships {
            graph.add_edge(relationship.source(), relationship.target());
        }
        graph
    }

    /// Adds a `source depends on target` edge, registering unseen nodes.
    pub fn add_edge(&mut self, source: Id, target: Id) {
        self.nodes.insert(source);
        self.nodes.insert(target);

        let idx = EdgeIndex(self.edges.len());
        self.edges.push(Edge { source, target });
        self.outgoing.entry(source).or_default().push(idx);
        self.incoming.entry(target).or_default().push(idx);
    }

    /// Returns all nodes in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes.iter().copied()
    }

    /// Returns the total number of nodes in the graph.
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of edges, parallel edges included.
    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Checks if a node with the given alias exists in the graph.
    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains(&id)
    }

    /// Number of edges leaving `id`, i.e. how many references it declares.
    pub fn dependency_count(&self, id: Id) -> usize {
        self.outgoing.get(&id).map_or(0, Vec::len)
    }

    /// Returns the targets `id` depends on, one per edge, in declaration order.
    pub fn dependencies(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .map(|idx| self.edges[idx.0].target)
    }

    /// Returns the sources that depend on `id`, one per edge, in declaration order.
    pub fn dependents(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.incoming
            .get(&id)
            .into_iter()
            .flatten()
            .map(|idx| self.edges[idx.0].source)
    }

    /// Returns nodes that depend on nothing, in first-appearance order.
    pub fn independent_nodes(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes
            .iter()
            .copied()
            .filter(|id| !self.outgoing.contains_key(id))
    }
}
