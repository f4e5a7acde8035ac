//! Metric registry and dependency ordering.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

use super::{
    Instability, Lcom, MetricDefinition, MetricError, MetricId, Modularity, ModuleCohesion,
    PartitionStrategy,
};

/// Registry of metric definitions.
///
/// Metrics can be registered in any order; [`resolve_order`](Self::resolve_order)
/// derives the execution order from their declared dependencies.
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    metrics: Vec<MetricDefinition>,
}

impl MetricRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in metrics and the default partition strategy.
    pub fn builtin() -> Self {
        Self::with_partition(PartitionStrategy::default())
    }

    /// Registry with the built-in metrics, clustering module children with `partition`.
    pub fn with_partition(partition: PartitionStrategy) -> Self {
        let mut registry = Self::new();
        registry
            .register(MetricDefinition::entity(Instability))
            .register(MetricDefinition::entity(Lcom))
            .register(MetricDefinition::entity(ModuleCohesion::new(partition)))
            .register(MetricDefinition::entity(Modularity));
        registry
    }

    pub fn register(&mut self, metric: MetricDefinition) -> &mut Self {
        self.metrics.push(metric);
        self
    }

    /// Registered metrics, in registration order.
    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    pub fn get(&self, id: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|metric| metric.id() == id)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Execution order: every metric after its dependencies.
    ///
    /// Independent metrics keep their registration order. Fails on duplicate
    /// ids, dependencies on unregistered metrics and dependency cycles.
    pub fn resolve_order(&self) -> Result<Vec<MetricDefinition>, MetricError> {
        let mut positions: HashMap<MetricId, usize> = HashMap::new();
        for (i, metric) in self.metrics.iter().enumerate() {
            if positions.insert(metric.id(), i).is_some() {
                return Err(MetricError::DuplicateMetric(metric.id().to_string()));
            }
        }

        let mut dependencies: Vec<Vec<usize>> = Vec::with_capacity(self.metrics.len());
        for metric in &self.metrics {
            let resolved = metric
                .depends_on()
                .iter()
                .map(|dependency| {
                    positions
                        .get(dependency)
                        .copied()
                        .ok_or_else(|| MetricError::UnknownDependency {
                            metric: metric.id().to_string(),
                            dependency: dependency.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            dependencies.push(resolved);
        }

        let mut graph = DiGraph::<usize, ()>::new();
        let nodes: Vec<_> = (0..self.metrics.len()).map(|i| graph.add_node(i)).collect();
        for (metric, deps) in dependencies.iter().enumerate() {
            for &dependency in deps {
                graph.add_edge(nodes[dependency], nodes[metric], ());
            }
        }
        if let Err(cycle) = toposort(&graph, None) {
            let metric = &self.metrics[graph[cycle.node_id()]];
            return Err(MetricError::DependencyCycle {
                metric: metric.id().to_string(),
            });
        }

        let mut visited = vec![false; self.metrics.len()];
        let mut order = Vec::with_capacity(self.metrics.len());
        for i in 0..self.metrics.len() {
            self.visit(i, &dependencies, &mut visited, &mut order);
        }
        Ok(order)
    }

    /// Post-order walk; the graph is known to be acyclic here.
    fn visit(
        &self,
        metric: usize,
        dependencies: &[Vec<usize>],
        visited: &mut [bool],
        order: &mut Vec<MetricDefinition>,
    ) {
        if visited[metric] {
            return;
        }
        visited[metric] = true;
        for &dependency in &dependencies[metric] {
            self.visit(dependency, dependencies, visited, order);
        }
        order.push(self.metrics[metric].clone());
    }
}
