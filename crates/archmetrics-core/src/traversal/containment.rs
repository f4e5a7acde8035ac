//! Containment strategies: how children are derived from CHILDREN_OF relations.
//!
//! Extractors emit a CHILDREN_OF relation from an entity to every enclosing
//! container. [`FlattenedContainment`] reads those relations literally, so a
//! nested entity is a child of each of its ancestors and deep traversal can
//! reach it several times. [`DirectContainment`] keeps only immediate
//! children and visits every descendant once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeIndex};
use crate::protocol::RelationKind;

/// Strategy for reading the containment hierarchy.
pub trait Containment: Send + Sync {
    /// Nodes contained in `node`.
    fn children(&self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex>;

    /// Nodes contained in `node` at any depth.
    fn children_deep(&self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex>;

    /// Strategy name, for logs.
    fn name(&self) -> &'static str;
}

/// Selects a [`Containment`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentMode {
    /// Every CHILDREN_OF relation counts, duplicates included.
    #[default]
    Flattened,
    /// Immediate children only; deep traversal visits each descendant once.
    Direct,
}

impl ContainmentMode {
    pub fn strategy(self) -> Box<dyn Containment> {
        match self {
            ContainmentMode::Flattened => Box::new(FlattenedContainment),
            ContainmentMode::Direct => Box::new(DirectContainment),
        }
    }
}

impl std::str::FromStr for ContainmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flattened" => Ok(ContainmentMode::Flattened),
            "direct" => Ok(ContainmentMode::Direct),
            other => Err(format!("unknown containment mode: {other}")),
        }
    }
}

/// Every node `X` with a CHILDREN_OF relation from `X` to `node`, `X` excluded
/// when it carries the same id as `node`.
fn flattened_children(graph: &Graph, node: NodeIndex) -> Vec<NodeIndex> {
    let id = &graph[node].id;
    graph
        .relations_of(node)
        .filter(|relation| relation.kind == RelationKind::ChildrenOf && relation.to == node)
        .filter(|relation| graph[relation.from].id != *id)
        .map(|relation| relation.from)
        .collect()
}

/// Literal reading of the pre-flattened CHILDREN_OF relations.
///
/// `children_deep` concatenates `children(node)` with the deep children of
/// each child without removing duplicates. A descendant nested `n` levels
/// below `node` is therefore returned once per containment path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenedContainment;

impl FlattenedContainment {
    fn collect_deep(&self, graph: &Graph, node: NodeIndex, path: &mut Vec<NodeIndex>, out: &mut Vec<NodeIndex>) {
        let children = flattened_children(graph, node);
        out.extend_from_slice(&children);

        path.push(node);
        for child in children {
            // A containment cycle would recurse forever
            if path.contains(&child) {
                continue;
            }
            self.collect_deep(graph, child, path, out);
        }
        path.pop();
    }
}

impl Containment for FlattenedContainment {
    fn children(&self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex> {
        flattened_children(graph, node)
    }

    fn children_deep(&self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        self.collect_deep(graph, node, &mut Vec::new(), &mut out);
        out
    }

    fn name(&self) -> &'static str {
        "flattened"
    }
}

/// Immediate children only.
///
/// A flattened child `X` of `node` is dropped when another container of `X`
/// is itself a child of `node`: `X` then sits deeper in the hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectContainment;

impl Containment for DirectContainment {
    fn children(&self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex> {
        let flattened = flattened_children(graph, node);
        let contained: HashSet<NodeIndex> = flattened.iter().copied().collect();
        let mut seen = HashSet::new();

        flattened
            .into_iter()
            .filter(|child| {
                let nested_deeper = graph.relations_of(*child).any(|relation| {
                    relation.kind == RelationKind::ChildrenOf
                        && relation.from == *child
                        && relation.to != node
                        && contained.contains(&relation.to)
                });
                !nested_deeper
            })
            .filter(|child| seen.insert(*child))
            .collect()
    }

    fn children_deep(&self, graph: &Graph, node: NodeIndex) -> Vec<NodeIndex> {
        let mut visited = HashSet::from([node]);
        let mut out = Vec::new();
        let mut stack: Vec<NodeIndex> = self.children(graph, node).into_iter().rev().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(graph, current).into_iter().rev());
        }
        out
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CodeEntity, EntityKind, FileEntity, Protocol};

    /// file > class > method, with flattened CHILDREN_OF relations.
    fn nested() -> Graph {
        let mut protocol = Protocol::new();
        protocol
            .push_file(FileEntity::new("f", "a.ts"))
            .push_entity(EntityKind::Class, CodeEntity::new("c", "C", "f"))
            .push_entity(EntityKind::Method, CodeEntity::new("m", "run", "f"))
            .push_relation("c", RelationKind::ChildrenOf, "f")
            .push_relation("m", RelationKind::ChildrenOf, "c")
            .push_relation("m", RelationKind::ChildrenOf, "f");
        Graph::build(&protocol).unwrap()
    }

    fn ids(graph: &Graph, nodes: &[NodeIndex]) -> Vec<String> {
        nodes.iter().map(|n| graph[*n].id.clone()).collect()
    }

    #[test]
    fn test_flattened_repeats_nested_descendants() {
        let graph = nested();
        let file = graph.find("f").unwrap();
        let strategy = FlattenedContainment;

        assert_eq!(ids(&graph, &strategy.children(&graph, file)), ["c", "m"]);
        assert_eq!(ids(&graph, &strategy.children_deep(&graph, file)), ["c", "m", "m"]);
    }

    #[test]
    fn test_direct_keeps_immediate_children() {
        let graph = nested();
        let file = graph.find("f").unwrap();
        let strategy = DirectContainment;

        assert_eq!(ids(&graph, &strategy.children(&graph, file)), ["c"]);
        assert_eq!(ids(&graph, &strategy.children_deep(&graph, file)), ["c", "m"]);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Direct".parse::<ContainmentMode>(), Ok(ContainmentMode::Direct));
        assert!("nested".parse::<ContainmentMode>().is_err());
    }
}
