//! Read-only queries over a [`Graph`]: containment, classification and
//! relationship predicates.
//!
//! Containment is delegated to a [`Containment`] strategy so metrics never
//! depend on how CHILDREN_OF relations are interpreted.
//!
//! ## Relationship predicates
//!
//! Every predicate has a directed and an either-way variant. The directed
//! variant asks whether `candidate` is the `from` endpoint of a relation of
//! the given kind attached to `node` or to any of its deep children. The
//! either-way variant also asks the same question with the roles swapped.
//! Call sites pick the variant by name so the direction is visible there.

mod containment;

pub use containment::{Containment, ContainmentMode, DirectContainment, FlattenedContainment};

use std::iter;

use crate::graph::{Graph, GraphRelation, NodeIndex};
use crate::protocol::RelationKind;

/// Graph queries bound to a containment strategy.
#[derive(Clone, Copy)]
pub struct Traversal<'a> {
    graph: &'a Graph,
    containment: &'a dyn Containment,
}

impl<'a> Traversal<'a> {
    pub fn new(graph: &'a Graph, containment: &'a dyn Containment) -> Self {
        Self { graph, containment }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn containment(&self) -> &'a dyn Containment {
        self.containment
    }

    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.containment.children(self.graph, node)
    }

    pub fn children_deep(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.containment.children_deep(self.graph, node)
    }

    /// Whether `node` is a behaviour entity (method, function, accessor, ...).
    pub fn is_collable(&self, node: NodeIndex) -> bool {
        self.graph[node].kind().is_collable()
    }

    /// Whether `node` is a data entity (field, variable, enum).
    pub fn is_data(&self, node: NodeIndex) -> bool {
        self.graph[node].kind().is_data()
    }

    /// `node` followed by its deep children.
    pub fn with_children_deep(&self, node: NodeIndex) -> Vec<NodeIndex> {
        iter::once(node).chain(self.children_deep(node)).collect()
    }

    /// Relations attached to `node` or to any of its deep children.
    ///
    /// A relation is repeated once per member it is attached to.
    pub fn related_relations(&self, node: NodeIndex) -> Vec<&'a GraphRelation> {
        let graph = self.graph;
        self.with_children_deep(node)
            .into_iter()
            .flat_map(|member| graph.relations_of(member))
            .collect()
    }

    fn has_relation_from(&self, node: NodeIndex, kind: RelationKind, from: NodeIndex) -> bool {
        let graph = self.graph;
        self.with_children_deep(node).into_iter().any(|member| {
            graph
                .relations_of(member)
                .any(|relation| relation.kind == kind && relation.from == from)
        })
    }

    /// USED_BY(candidate, _) is attached to `node` or its deep children.
    pub fn used_by(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.has_relation_from(node, RelationKind::UsedBy, candidate)
    }

    /// [`used_by`](Self::used_by) in either direction.
    pub fn used_by_either_way(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.used_by(node, candidate) || self.used_by(candidate, node)
    }

    /// EXTENDS(candidate, _) is attached to `node` or its deep children.
    pub fn extends_with(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.has_relation_from(node, RelationKind::Extends, candidate)
    }

    /// [`extends_with`](Self::extends_with) in either direction.
    pub fn extends_with_either_way(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.extends_with(node, candidate) || self.extends_with(candidate, node)
    }

    /// IMPLEMENTS(candidate, _) is attached to `node` or its deep children.
    pub fn implements_with(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.has_relation_from(node, RelationKind::Implements, candidate)
    }

    /// [`implements_with`](Self::implements_with) in either direction.
    pub fn implements_with_either_way(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.implements_with(node, candidate) || self.implements_with(candidate, node)
    }

    /// Any either-way dependency between the two nodes.
    pub fn related_either_way(&self, node: NodeIndex, candidate: NodeIndex) -> bool {
        self.used_by_either_way(node, candidate)
            || self.extends_with_either_way(node, candidate)
            || self.implements_with_either_way(node, candidate)
    }
}
