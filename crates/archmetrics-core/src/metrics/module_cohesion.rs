use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

use super::{EntityContext, EntityMetric, MetricError, MetricId, MetricInfo};
use crate::graph::NodeIndex;
use crate::protocol::EntityKind;
use crate::traversal::Traversal;

pub const MODULE_COHESION: MetricId = "Module Cohesion";

/// How a module's children are clustered before measuring density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// Single left-to-right pass; a child joins the first cluster holding a
    /// related node and clusters are never merged afterwards.
    #[default]
    Greedy,
    /// True connected components of the relatedness relation.
    ConnectedComponents,
}

impl std::str::FromStr for PartitionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "greedy" => Ok(PartitionStrategy::Greedy),
            "connected_components" => Ok(PartitionStrategy::ConnectedComponents),
            other => Err(format!("unknown partition strategy: {other}")),
        }
    }
}

impl PartitionStrategy {
    /// Split `nodes` into clusters, ordered by their first member.
    pub fn partition(self, traversal: &Traversal<'_>, nodes: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
        match self {
            PartitionStrategy::Greedy => greedy_partition(traversal, nodes),
            PartitionStrategy::ConnectedComponents => connected_components(traversal, nodes),
        }
    }
}

fn greedy_partition(traversal: &Traversal<'_>, nodes: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
    let mut clusters: Vec<Vec<NodeIndex>> = Vec::new();

    for &node in nodes {
        let joined = clusters
            .iter_mut()
            .find(|cluster| cluster.iter().any(|member| traversal.related_either_way(node, *member)));

        match joined {
            Some(cluster) => cluster.push(node),
            None => clusters.push(vec![node]),
        }
    }
    clusters
}

fn connected_components(traversal: &Traversal<'_>, nodes: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
    let mut components = UnionFind::<usize>::new(nodes.len());
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if traversal.related_either_way(nodes[j], nodes[i]) {
                components.union(i, j);
            }
        }
    }

    let mut roots: Vec<usize> = Vec::new();
    let mut clusters: Vec<Vec<NodeIndex>> = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        let root = components.find(i);
        match roots.iter().position(|r| *r == root) {
            Some(slot) => clusters[slot].push(*node),
            None => {
                roots.push(root);
                clusters.push(vec![*node]);
            }
        }
    }
    clusters
}

/// Density of relations inside the largest cluster of a module's children.
///
/// Pairs inside the cluster count as connected through USED_BY or EXTENDS in
/// either direction, or through IMPLEMENTS in the pair's order only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleCohesion {
    partition: PartitionStrategy,
}

impl ModuleCohesion {
    pub fn new(partition: PartitionStrategy) -> Self {
        Self { partition }
    }

    pub fn partition(&self) -> PartitionStrategy {
        self.partition
    }

    fn connected_pairs(traversal: &Traversal<'_>, cluster: &[NodeIndex]) -> usize {
        let mut pairs = 0;
        for (i, &first) in cluster.iter().enumerate() {
            for &second in &cluster[i + 1..] {
                if traversal.used_by_either_way(first, second)
                    || traversal.extends_with_either_way(first, second)
                    || traversal.implements_with(first, second)
                {
                    pairs += 1;
                }
            }
        }
        pairs
    }
}

impl MetricInfo for ModuleCohesion {
    fn id(&self) -> MetricId {
        MODULE_COHESION
    }

    fn name(&self) -> &'static str {
        "Module Cohesion"
    }

    fn description(&self) -> &'static str {
        "Cohesion of a module"
    }
}

impl EntityMetric for ModuleCohesion {
    fn applicable_kinds(&self) -> &[EntityKind] {
        &[EntityKind::Namespace, EntityKind::File]
    }

    fn compute(&self, ctx: &EntityContext<'_>) -> Result<f64, MetricError> {
        let traversal = &ctx.traversal;
        let children = traversal.children(ctx.node);

        match children.len() {
            0 => return Ok(0.0),
            1 => return Ok(1.0),
            _ => {}
        }

        let clusters = self.partition.partition(traversal, &children);
        // First cluster wins ties
        let mut largest: &[NodeIndex] = &[];
        for cluster in &clusters {
            if cluster.len() > largest.len() {
                largest = cluster;
            }
        }

        let k = largest.len();
        if k < 2 {
            return Ok(0.0);
        }

        let possible = (k * (k - 1) / 2) as f64;
        Ok(Self::connected_pairs(traversal, largest) as f64 / possible)
    }
}
