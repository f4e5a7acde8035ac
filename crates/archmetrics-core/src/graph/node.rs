//! Graph nodes and relations.

use crate::protocol::{EntityKind, RelationKind};

/// Position of a node inside its [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position of a relation inside its [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationIndex(pub(crate) usize);

impl RelationIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a node together with the fields only that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File { path: String },
    Namespace,
    Class { is_abstract: bool },
    Function,
    Enum,
    Interface,
    Variable,
    Type,
    Method,
    Constructor,
    Field,
    Getter,
    Setter,
    FunctionVariable,
    ClassStaticBlock,
    FunctionProperty,
}

impl NodeKind {
    /// Payload-free node kind for a plain code entity.
    ///
    /// Returns `None` for files and classes, which need their extra fields.
    pub fn plain(kind: EntityKind) -> Option<Self> {
        let node_kind = match kind {
            EntityKind::File | EntityKind::Class => return None,
            EntityKind::Namespace => NodeKind::Namespace,
            EntityKind::Function => NodeKind::Function,
            EntityKind::Enum => NodeKind::Enum,
            EntityKind::Interface => NodeKind::Interface,
            EntityKind::Variable => NodeKind::Variable,
            EntityKind::Type => NodeKind::Type,
            EntityKind::Method => NodeKind::Method,
            EntityKind::Constructor => NodeKind::Constructor,
            EntityKind::Field => NodeKind::Field,
            EntityKind::Getter => NodeKind::Getter,
            EntityKind::Setter => NodeKind::Setter,
            EntityKind::FunctionVariable => NodeKind::FunctionVariable,
            EntityKind::ClassStaticBlock => NodeKind::ClassStaticBlock,
            EntityKind::FunctionProperty => NodeKind::FunctionProperty,
        };
        Some(node_kind)
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self {
            NodeKind::File { .. } => EntityKind::File,
            NodeKind::Namespace => EntityKind::Namespace,
            NodeKind::Class { .. } => EntityKind::Class,
            NodeKind::Function => EntityKind::Function,
            NodeKind::Enum => EntityKind::Enum,
            NodeKind::Interface => EntityKind::Interface,
            NodeKind::Variable => EntityKind::Variable,
            NodeKind::Type => EntityKind::Type,
            NodeKind::Method => EntityKind::Method,
            NodeKind::Constructor => EntityKind::Constructor,
            NodeKind::Field => EntityKind::Field,
            NodeKind::Getter => EntityKind::Getter,
            NodeKind::Setter => EntityKind::Setter,
            NodeKind::FunctionVariable => EntityKind::FunctionVariable,
            NodeKind::ClassStaticBlock => EntityKind::ClassStaticBlock,
            NodeKind::FunctionProperty => EntityKind::FunctionProperty,
        }
    }
}

/// An entity inside the graph, annotated with every relation it takes part in.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub is_internal: bool,
    /// Declaring file; `None` only for file nodes
    pub parent_file: Option<NodeIndex>,
    pub detail: NodeKind,
    pub(crate) relations: Vec<RelationIndex>,
}

impl Node {
    pub fn kind(&self) -> EntityKind {
        self.detail.entity_kind()
    }

    /// Relations where this node is either endpoint, in protocol order.
    pub fn relations(&self) -> &[RelationIndex] {
        &self.relations
    }

    /// File path, for file nodes.
    pub fn path(&self) -> Option<&str> {
        match &self.detail {
            NodeKind::File { path } => Some(path),
            _ => None,
        }
    }

    /// Abstractness, for class nodes.
    pub fn is_abstract(&self) -> Option<bool> {
        match self.detail {
            NodeKind::Class { is_abstract } => Some(is_abstract),
            _ => None,
        }
    }
}

/// A relation with both endpoints resolved to graph nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRelation {
    pub id: String,
    pub from: NodeIndex,
    pub kind: RelationKind,
    pub to: NodeIndex,
}

impl GraphRelation {
    /// Whether `node` is either endpoint.
    pub fn touches(&self, node: NodeIndex) -> bool {
        self.from == node || self.to == node
    }
}
