use archmetrics_core::metrics::{
    EntityContext, EntityMetric, Instability, Lcom, MetricInfo, MetricScope, Modularity,
    ModuleCohesion, INSTABILITY, LCOM, MODULARITY, MODULE_COHESION,
};
use archmetrics_core::{EntityKind, MetricDefinition, MetricError, MetricId, MetricRegistry};

/// Entity metric with configurable id and dependencies.
struct Probe {
    id: MetricId,
    depends_on: &'static [MetricId],
}

impl MetricInfo for Probe {
    fn id(&self) -> MetricId {
        self.id
    }

    fn name(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        "Probe"
    }

    fn depends_on(&self) -> &[MetricId] {
        self.depends_on
    }
}

impl EntityMetric for Probe {
    fn applicable_kinds(&self) -> &[EntityKind] {
        &[EntityKind::Function]
    }

    fn compute(&self, _ctx: &EntityContext<'_>) -> Result<f64, MetricError> {
        Ok(0.0)
    }
}

fn probe(id: MetricId, depends_on: &'static [MetricId]) -> MetricDefinition {
    MetricDefinition::entity(Probe { id, depends_on })
}

fn order(registry: &MetricRegistry) -> Vec<MetricId> {
    registry
        .resolve_order()
        .unwrap()
        .iter()
        .map(|metric| metric.id())
        .collect()
}

#[test]
fn test_builtin_registry() {
    let registry = MetricRegistry::builtin();
    assert_eq!(registry.len(), 4);
    assert_eq!(order(&registry), [INSTABILITY, LCOM, MODULE_COHESION, MODULARITY]);

    let modularity = registry.get(MODULARITY).unwrap();
    assert_eq!(modularity.scope(), MetricScope::Entity);
    assert_eq!(modularity.depends_on(), [INSTABILITY, LCOM, MODULE_COHESION]);
    assert_eq!(modularity.applicable_kinds().unwrap().len(), EntityKind::ALL.len());
    assert!(registry.get("Unknown").is_none());
}

#[test]
fn test_registration_order_independent() {
    let mut registry = MetricRegistry::new();
    registry
        .register(MetricDefinition::entity(Modularity))
        .register(MetricDefinition::entity(Lcom))
        .register(MetricDefinition::entity(ModuleCohesion::default()))
        .register(MetricDefinition::entity(Instability));

    assert_eq!(order(&registry), [INSTABILITY, LCOM, MODULE_COHESION, MODULARITY]);
}

#[test]
fn test_independent_metrics_keep_registration_order() {
    let mut registry = MetricRegistry::new();
    registry
        .register(probe("c", &[]))
        .register(probe("a", &[]))
        .register(probe("d", &["b"]))
        .register(probe("b", &[]));

    assert_eq!(order(&registry), ["c", "a", "b", "d"]);
}

#[test]
fn test_transitive_dependencies() {
    let mut registry = MetricRegistry::new();
    registry
        .register(probe("top", &["middle"]))
        .register(probe("middle", &["bottom"]))
        .register(probe("bottom", &[]));

    assert_eq!(order(&registry), ["bottom", "middle", "top"]);
}

#[test]
fn test_cycle_rejected() {
    let mut registry = MetricRegistry::new();
    registry
        .register(probe("a", &["b"]))
        .register(probe("b", &["c"]))
        .register(probe("c", &["a"]));

    let err = registry.resolve_order().unwrap_err();
    assert!(matches!(err, MetricError::DependencyCycle { .. }), "{err}");
}

#[test]
fn test_self_dependency_rejected() {
    let mut registry = MetricRegistry::new();
    registry.register(probe("a", &["a"]));

    assert_eq!(
        registry.resolve_order().unwrap_err(),
        MetricError::DependencyCycle {
            metric: "a".to_string()
        }
    );
}

#[test]
fn test_unknown_dependency_rejected() {
    let mut registry = MetricRegistry::new();
    registry.register(MetricDefinition::entity(Modularity));

    assert_eq!(
        registry.resolve_order().unwrap_err(),
        MetricError::UnknownDependency {
            metric: MODULARITY.to_string(),
            dependency: INSTABILITY.to_string(),
        }
    );
}

#[test]
fn test_duplicate_rejected() {
    let mut registry = MetricRegistry::new();
    registry.register(probe("a", &[])).register(probe("a", &[]));

    assert_eq!(
        registry.resolve_order().unwrap_err(),
        MetricError::DuplicateMetric("a".to_string())
    );
}
