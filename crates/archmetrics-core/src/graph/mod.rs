//! Entity graph built from a protocol.
//!
//! The [`Graph`] owns every node (flat, and grouped by kind) and every
//! relation (flat, in protocol order). Each node's relation list is a view of
//! indices into the flat relation list, so relations are shared rather than
//! copied.
//!
//! The graph is immutable once built and is the read-only input of the
//! analyser.

mod builder;
mod error;
mod node;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use node::{GraphRelation, Node, NodeIndex, NodeKind, RelationIndex};

use std::collections::HashMap;
use std::ops::Index;

use crate::protocol::{EntityKind, Protocol, RelationKind};

/// Validated, cross-referenced entity graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    by_kind: Vec<Vec<NodeIndex>>,
    relations: Vec<GraphRelation>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl Graph {
    /// Build a graph from a protocol.
    ///
    /// Fails if a relation references an unknown entity id or a code entity
    /// references an unknown parent file.
    pub fn build(protocol: &Protocol) -> Result<Self, GraphError> {
        GraphBuilder::new().build(protocol)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    /// All nodes: files first, then every other kind in [`EntityKind::ALL`] order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Nodes of one kind, in protocol order.
    pub fn nodes_of_kind(&self, kind: EntityKind) -> &[NodeIndex] {
        &self.by_kind[kind.ordinal()]
    }

    /// Look a node up by entity id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub fn relation(&self, index: RelationIndex) -> &GraphRelation {
        &self.relations[index.0]
    }

    /// Every relation, in protocol order.
    pub fn relations(&self) -> &[GraphRelation] {
        &self.relations
    }

    /// Relations where `node` is either endpoint, in protocol order.
    pub fn relations_of(&self, node: NodeIndex) -> impl Iterator<Item = &GraphRelation> + '_ {
        self.nodes[node.0]
            .relations
            .iter()
            .map(move |index| &self.relations[index.0])
    }

    /// The file declaring `node`; `None` for file nodes.
    pub fn parent_file(&self, node: NodeIndex) -> Option<&Node> {
        self.nodes[node.0].parent_file.map(|file| self.node(file))
    }

    /// The `to` endpoint of the first relation that starts at `node`.
    ///
    /// Extractors emit the immediate CHILDREN_OF relation of an entity before
    /// any other relation from it, so this is the entity's container.
    pub fn parent_container(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.relations_of(node)
            .find(|relation| relation.from == node)
            .map(|relation| relation.to)
    }

    /// Number of relations of the given kind.
    pub fn relation_count(&self, kind: RelationKind) -> usize {
        self.relations.iter().filter(|r| r.kind == kind).count()
    }
}

impl Index<NodeIndex> for Graph {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Node {
        self.node(index)
    }
}
