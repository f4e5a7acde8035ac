//! Relation records between extracted entities.
//!
//! Every relation is directed and its meaning depends on the kind:
//! - CHILDREN_OF: `from` is contained within `to`
//! - EXTENDS: `from` extends `to`
//! - IMPLEMENTS: `from` implements `to`
//! - USED_BY: `from` is used by `to` (`to` depends on `from`)

use serde::{Deserialize, Serialize};

/// Kind of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    ChildrenOf,
    Extends,
    Implements,
    UsedBy,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::ChildrenOf,
        RelationKind::Extends,
        RelationKind::Implements,
        RelationKind::UsedBy,
    ];

    /// Relations that express a dependency between entities, as opposed to containment.
    pub fn is_dependency(self) -> bool {
        !matches!(self, RelationKind::ChildrenOf)
    }

    /// Name used inside derived relation ids.
    pub fn relation_name(self) -> &'static str {
        match self {
            RelationKind::ChildrenOf => "ChildrenOf",
            RelationKind::Extends => "Extends",
            RelationKind::Implements => "Implements",
            RelationKind::UsedBy => "UsedBy",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.relation_name())
    }
}

/// A relation between two entities, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Deduplication key, derived from the endpoints and the kind
    pub id: String,
    /// Source entity id
    pub from: String,
    pub kind: RelationKind,
    /// Target entity id
    pub to: String,
}

impl Relation {
    /// Create a relation with a derived id.
    pub fn new(from: impl Into<String>, kind: RelationKind, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            id: Self::derive_id(&from, kind, &to),
            from,
            kind,
            to,
        }
    }

    /// Deterministic id for an ordered pair of endpoints and a kind.
    pub fn derive_id(from: &str, kind: RelationKind, to: &str) -> String {
        format!("{} => {} => {}", from, kind.relation_name(), to)
    }
}
