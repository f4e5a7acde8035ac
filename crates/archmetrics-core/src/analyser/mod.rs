//! Metric execution over a built graph.
//!
//! The [`Analyser`] resolves the registry into dependency order and runs each
//! metric to completion before the next one starts, so a metric always sees
//! the values of its dependencies for every node. Within one entity metric the
//! nodes are independent; with `parallel` set they are computed on the rayon
//! pool and written back in graph order.

mod result;

pub use result::{AnalyticsResult, MetricValues};

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::graph::{Graph, NodeIndex};
use crate::metrics::{
    EntityContext, EntityMetric, GlobalContext, GlobalMetric, GroupContext, GroupMetric,
    MetricDefinition, MetricError, MetricInfo, MetricRegistry,
};
use crate::protocol::Protocol;
use crate::traversal::{Containment, ContainmentMode, Traversal};

/// Runs registered metrics over a graph.
pub struct Analyser {
    registry: MetricRegistry,
    containment: Box<dyn Containment>,
    parallel: bool,
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyser {
    /// Built-in metrics, flattened containment, sequential.
    pub fn new() -> Self {
        Self::with_registry(MetricRegistry::builtin())
    }

    pub fn with_registry(registry: MetricRegistry) -> Self {
        Self {
            registry,
            containment: ContainmentMode::default().strategy(),
            parallel: false,
        }
    }

    /// Built-in metrics with containment, partition and parallelism from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_registry(MetricRegistry::with_partition(config.cohesion.partition))
            .containment(config.traversal.containment)
            .parallel(config.analysis.parallel)
    }

    pub fn containment(mut self, mode: ContainmentMode) -> Self {
        self.containment = mode.strategy();
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Run every registered metric over `graph`.
    pub fn analyse(&self, graph: &Graph) -> Result<AnalyticsResult, AnalysisError> {
        let order = self.registry.resolve_order()?;
        debug!(
            order = ?order.iter().map(|m| m.id()).collect::<Vec<_>>(),
            "Resolved metric order"
        );
        info!(
            nodes = graph.len(),
            metrics = order.len(),
            containment = self.containment.name(),
            parallel = self.parallel,
            "Starting analysis"
        );

        let traversal = Traversal::new(graph, self.containment.as_ref());
        let mut results = AnalyticsResult::new();

        for metric in &order {
            match metric {
                MetricDefinition::Entity(m) => self.run_entity(m, traversal, &mut results)?,
                MetricDefinition::Group(m) => run_group(m, traversal, &mut results)?,
                MetricDefinition::Global(m) => run_global(m, traversal, &mut results)?,
            }
        }

        info!(entities = results.entities().count(), "Analysis complete");
        Ok(results)
    }

    fn run_entity(
        &self,
        metric: &Arc<dyn EntityMetric>,
        traversal: Traversal<'_>,
        results: &mut AnalyticsResult,
    ) -> Result<(), MetricError> {
        let graph = traversal.graph();
        let id = metric.id();

        for &kind in metric.applicable_kinds() {
            let nodes = graph.nodes_of_kind(kind);
            if nodes.is_empty() {
                continue;
            }

            let values = {
                let prior: &AnalyticsResult = results;
                let compute = |node: NodeIndex| -> Result<f64, MetricError> {
                    let ctx = EntityContext::new(traversal, node, id, prior.entity(&graph[node].id));
                    metric.compute(&ctx)
                };
                if self.parallel {
                    nodes
                        .par_iter()
                        .map(|&node| compute(node))
                        .collect::<Result<Vec<_>, _>>()?
                } else {
                    nodes
                        .iter()
                        .map(|&node| compute(node))
                        .collect::<Result<Vec<_>, _>>()?
                }
            };

            for (&node, value) in nodes.iter().zip(values) {
                results.insert_entity(&graph[node].id, id, value);
            }
            debug!(metric = id, kind = %kind, nodes = nodes.len(), "Computed entity metric");
        }
        Ok(())
    }
}

fn run_group(
    metric: &Arc<dyn GroupMetric>,
    traversal: Traversal<'_>,
    results: &mut AnalyticsResult,
) -> Result<(), MetricError> {
    let graph = traversal.graph();

    for &kind in metric.applicable_kinds() {
        let nodes = graph.nodes_of_kind(kind);
        if nodes.is_empty() {
            continue;
        }
        let value = metric.compute(&GroupContext {
            traversal,
            kind,
            nodes,
            results,
        })?;
        results.insert_group(kind, metric.id(), value);
        debug!(metric = metric.id(), kind = %kind, "Computed group metric");
    }
    Ok(())
}

fn run_global(
    metric: &Arc<dyn GlobalMetric>,
    traversal: Traversal<'_>,
    results: &mut AnalyticsResult,
) -> Result<(), MetricError> {
    let value = metric.compute(&GlobalContext { traversal, results })?;
    results.insert_global(metric.id(), value);
    debug!(metric = metric.id(), "Computed global metric");
    Ok(())
}

/// A built graph with the metrics computed over it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: Graph,
    pub metrics: AnalyticsResult,
}

/// Build the graph of `protocol` and analyse it with `config`.
pub fn analyse_architecture(protocol: &Protocol, config: &Config) -> Result<Analysis, AnalysisError> {
    let graph = Graph::build(protocol)?;
    let metrics = Analyser::from_config(config).analyse(&graph)?;
    Ok(Analysis { graph, metrics })
}
