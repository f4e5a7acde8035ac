//! Metric definitions.
//!
//! A metric is a self-describing unit of computation. Every metric declares an
//! id, a name and the metrics it depends on through [`MetricInfo`], and one of
//! three scopes:
//!
//! - [`EntityMetric`]: computed once per node of each applicable kind
//! - [`GroupMetric`]: computed once per applicable kind over all its nodes
//! - [`GlobalMetric`]: computed once over the whole graph
//!
//! The analyser runs metrics in dependency order, so a metric can read the
//! values its dependencies produced for the same node.
//!
//! ## Built-in metrics
//!
//! - [`Instability`] - outgoing share of structural dependencies
//! - [`Lcom`] - lack of cohesion of a class's methods
//! - [`ModuleCohesion`] - interconnection density of a module's children
//! - [`Modularity`] - stability combined with cohesion

mod error;
mod instability;
mod lcom;
mod modularity;
mod module_cohesion;
mod registry;

pub use error::MetricError;
pub use instability::{Instability, INSTABILITY};
pub use lcom::{Lcom, LCOM};
pub use modularity::{Modularity, MODULARITY};
pub use module_cohesion::{ModuleCohesion, PartitionStrategy, MODULE_COHESION};
pub use registry::MetricRegistry;

use std::sync::Arc;

use crate::analyser::{AnalyticsResult, MetricValues};
use crate::graph::{Graph, NodeIndex};
use crate::protocol::EntityKind;
use crate::traversal::Traversal;

/// Stable metric identifier, also the key of every result map.
pub type MetricId = &'static str;

/// Description shared by metrics of every scope.
pub trait MetricInfo: Send + Sync {
    fn id(&self) -> MetricId;

    /// Display name.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Metrics that must be computed before this one.
    fn depends_on(&self) -> &[MetricId] {
        &[]
    }
}

/// A metric computed for each node of the applicable kinds.
pub trait EntityMetric: MetricInfo {
    fn applicable_kinds(&self) -> &[EntityKind];

    fn compute(&self, ctx: &EntityContext<'_>) -> Result<f64, MetricError>;
}

/// A metric computed once per applicable kind.
pub trait GroupMetric: MetricInfo {
    fn applicable_kinds(&self) -> &[EntityKind];

    fn compute(&self, ctx: &GroupContext<'_>) -> Result<f64, MetricError>;
}

/// A metric computed once for the whole graph.
pub trait GlobalMetric: MetricInfo {
    fn compute(&self, ctx: &GlobalContext<'_>) -> Result<f64, MetricError>;
}

/// Scope of a metric definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricScope {
    Entity,
    Group,
    Global,
}

impl std::fmt::Display for MetricScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::Group => write!(f, "group"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// A registered metric of any scope.
#[derive(Clone)]
pub enum MetricDefinition {
    Entity(Arc<dyn EntityMetric>),
    Group(Arc<dyn GroupMetric>),
    Global(Arc<dyn GlobalMetric>),
}

impl MetricDefinition {
    pub fn entity(metric: impl EntityMetric + 'static) -> Self {
        Self::Entity(Arc::new(metric))
    }

    pub fn group(metric: impl GroupMetric + 'static) -> Self {
        Self::Group(Arc::new(metric))
    }

    pub fn global(metric: impl GlobalMetric + 'static) -> Self {
        Self::Global(Arc::new(metric))
    }

    pub fn scope(&self) -> MetricScope {
        match self {
            Self::Entity(_) => MetricScope::Entity,
            Self::Group(_) => MetricScope::Group,
            Self::Global(_) => MetricScope::Global,
        }
    }

    pub fn id(&self) -> MetricId {
        match self {
            Self::Entity(m) => m.id(),
            Self::Group(m) => m.id(),
            Self::Global(m) => m.id(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Entity(m) => m.name(),
            Self::Group(m) => m.name(),
            Self::Global(m) => m.name(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Entity(m) => m.description(),
            Self::Group(m) => m.description(),
            Self::Global(m) => m.description(),
        }
    }

    pub fn depends_on(&self) -> &[MetricId] {
        match self {
            Self::Entity(m) => m.depends_on(),
            Self::Group(m) => m.depends_on(),
            Self::Global(m) => m.depends_on(),
        }
    }

    /// Applicable kinds; `None` for global metrics.
    pub fn applicable_kinds(&self) -> Option<&[EntityKind]> {
        match self {
            Self::Entity(m) => Some(m.applicable_kinds()),
            Self::Group(m) => Some(m.applicable_kinds()),
            Self::Global(_) => None,
        }
    }
}

impl std::fmt::Debug for MetricDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricDefinition")
            .field("id", &self.id())
            .field("scope", &self.scope())
            .finish()
    }
}

/// Input of an [`EntityMetric`] computation.
pub struct EntityContext<'a> {
    pub traversal: Traversal<'a>,
    pub node: NodeIndex,
    metric: MetricId,
    prior: Option<&'a MetricValues>,
}

impl<'a> EntityContext<'a> {
    pub fn new(
        traversal: Traversal<'a>,
        node: NodeIndex,
        metric: MetricId,
        prior: Option<&'a MetricValues>,
    ) -> Self {
        Self {
            traversal,
            node,
            metric,
            prior,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.traversal.graph()
    }

    pub fn kind(&self) -> EntityKind {
        self.graph()[self.node].kind()
    }

    /// Value of a dependency metric already computed for this node.
    pub fn dependency(&self, dependency: MetricId) -> Result<f64, MetricError> {
        self.prior
            .and_then(|values| values.get(dependency))
            .copied()
            .ok_or_else(|| MetricError::MissingDependency {
                metric: self.metric.to_string(),
                dependency: dependency.to_string(),
                entity_id: self.graph()[self.node].id.clone(),
            })
    }
}

/// Input of a [`GroupMetric`] computation.
pub struct GroupContext<'a> {
    pub traversal: Traversal<'a>,
    pub kind: EntityKind,
    pub nodes: &'a [NodeIndex],
    /// Everything computed so far
    pub results: &'a AnalyticsResult,
}

/// Input of a [`GlobalMetric`] computation.
pub struct GlobalContext<'a> {
    pub traversal: Traversal<'a>,
    /// Everything computed so far
    pub results: &'a AnalyticsResult,
}
