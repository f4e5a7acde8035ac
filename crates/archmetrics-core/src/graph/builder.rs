//! Protocol to graph conversion.
//!
//! The build runs in three passes:
//! 1. Files, then every code entity, become nodes; parent files are resolved
//!    against the file nodes built so far.
//! 2. Every relation has both endpoint ids resolved against all nodes.
//! 3. Each node receives the relations it takes part in, in protocol order.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::error::GraphError;
use super::node::{GraphRelation, Node, NodeIndex, NodeKind, RelationIndex};
use super::Graph;
use crate::protocol::{CodeEntity, EntityKind, FileEntity, Protocol};

/// Builder for constructing a [`Graph`] from a [`Protocol`].
pub struct GraphBuilder {
    nodes: Vec<Node>,
    by_kind: Vec<Vec<NodeIndex>>,
    id_to_index: HashMap<String, NodeIndex>,
    file_ids: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_kind: vec![Vec::new(); EntityKind::ALL.len()],
            id_to_index: HashMap::new(),
            file_ids: HashMap::new(),
        }
    }

    /// Build a fully cross-referenced graph.
    pub fn build(mut self, protocol: &Protocol) -> Result<Graph, GraphError> {
        for file in &protocol.files {
            self.load_file(file);
        }

        for kind in EntityKind::ALL {
            match kind {
                EntityKind::File => {}
                EntityKind::Class => {
                    for class in &protocol.classes {
                        let detail = NodeKind::Class {
                            is_abstract: class.is_abstract,
                        };
                        self.load_code_entity(&class.base, detail)?;
                    }
                }
                other => {
                    let Some(detail) = NodeKind::plain(other) else {
                        continue;
                    };
                    for entity in protocol.code_entities(other).unwrap_or_default() {
                        self.load_code_entity(entity, detail.clone())?;
                    }
                }
            }
        }

        let relations = self.resolve_relations(protocol)?;
        self.attach_relations(&relations);

        debug!(
            nodes = self.nodes.len(),
            relations = relations.len(),
            "Graph built"
        );

        Ok(Graph {
            nodes: self.nodes,
            by_kind: self.by_kind,
            relations,
            id_to_index: self.id_to_index,
        })
    }

    fn load_file(&mut self, file: &FileEntity) {
        let index = self.add_node(Node {
            id: file.id.clone(),
            name: file.name.clone(),
            is_internal: file.is_internal,
            parent_file: None,
            detail: NodeKind::File {
                path: file.path.clone(),
            },
            relations: Vec::new(),
        });
        self.file_ids.entry(file.id.clone()).or_insert(index);
    }

    fn load_code_entity(&mut self, entity: &CodeEntity, detail: NodeKind) -> Result<(), GraphError> {
        let parent_file = self.file_ids.get(&entity.parent_file).copied().ok_or_else(|| {
            GraphError::UnknownParentFile {
                entity_id: entity.id.clone(),
                file_id: entity.parent_file.clone(),
            }
        })?;

        self.add_node(Node {
            id: entity.id.clone(),
            name: entity.name.clone(),
            is_internal: entity.is_internal,
            parent_file: Some(parent_file),
            detail,
            relations: Vec::new(),
        });
        Ok(())
    }

    /// Add a node; the first node registered under an id wins lookups.
    fn add_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        if self.id_to_index.contains_key(&node.id) {
            warn!(id = %node.id, "Duplicate entity id, keeping the first occurrence for lookups");
        } else {
            self.id_to_index.insert(node.id.clone(), index);
        }
        self.by_kind[node.kind().ordinal()].push(index);
        self.nodes.push(node);
        index
    }

    fn resolve_relations(&self, protocol: &Protocol) -> Result<Vec<GraphRelation>, GraphError> {
        protocol
            .relations
            .iter()
            .map(|relation| {
                Ok(GraphRelation {
                    id: relation.id.clone(),
                    from: self.resolve(&relation.id, &relation.from)?,
                    kind: relation.kind,
                    to: self.resolve(&relation.id, &relation.to)?,
                })
            })
            .collect()
    }

    fn resolve(&self, relation_id: &str, entity_id: &str) -> Result<NodeIndex, GraphError> {
        self.id_to_index
            .get(entity_id)
            .copied()
            .ok_or_else(|| GraphError::UnknownRelationEndpoint {
                relation_id: relation_id.to_string(),
                entity_id: entity_id.to_string(),
            })
    }

    fn attach_relations(&mut self, relations: &[GraphRelation]) {
        for (i, relation) in relations.iter().enumerate() {
            let index = RelationIndex(i);
            self.nodes[relation.from.0].relations.push(index);
            if relation.to != relation.from {
                self.nodes[relation.to.0].relations.push(index);
            }
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RelationKind;

    #[test]
    fn test_self_relation_attached_once() {
        let mut protocol = Protocol::new();
        protocol
            .push_file(FileEntity::new("f", "a.ts"))
            .push_entity(EntityKind::Function, CodeEntity::new("fn", "rec", "f"))
            .push_relation("fn", RelationKind::UsedBy, "fn");

        let graph = GraphBuilder::new().build(&protocol).unwrap();
        let node = graph.find("fn").unwrap();
        assert_eq!(graph[node].relations().len(), 1);
    }

    #[test]
    fn test_parent_file_must_be_a_file() {
        let mut protocol = Protocol::new();
        protocol
            .push_file(FileEntity::new("f", "a.ts"))
            .push_entity(EntityKind::Class, CodeEntity::new("c", "C", "f"))
            .push_entity(EntityKind::Method, CodeEntity::new("m", "run", "c"));

        let err = GraphBuilder::new().build(&protocol).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownParentFile {
                entity_id: "m".to_string(),
                file_id: "c".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_ids_keep_first_for_lookup() {
        let mut protocol = Protocol::new();
        protocol
            .push_file(FileEntity::new("f", "a.ts"))
            .push_entity(EntityKind::Function, CodeEntity::new("x", "first", "f"))
            .push_entity(EntityKind::Variable, CodeEntity::new("x", "second", "f"));

        let graph = GraphBuilder::new().build(&protocol).unwrap();
        assert_eq!(graph.len(), 3);
        let found = graph.find("x").unwrap();
        assert_eq!(graph[found].name, "first");
    }
}
