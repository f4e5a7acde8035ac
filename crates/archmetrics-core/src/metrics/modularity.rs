use super::{
    EntityContext, EntityMetric, MetricError, MetricId, MetricInfo, INSTABILITY, LCOM,
    MODULE_COHESION,
};
use crate::protocol::EntityKind;

pub const MODULARITY: MetricId = "Modularity";

/// Stability combined with cohesion.
///
/// - classes: `(1 - instability) * (1 - LCOM)`
/// - files and namespaces: `(1 - instability) * module cohesion`
/// - everything else: `1 - instability`
#[derive(Debug, Clone, Copy, Default)]
pub struct Modularity;

impl MetricInfo for Modularity {
    fn id(&self) -> MetricId {
        MODULARITY
    }

    fn name(&self) -> &'static str {
        "Modularity"
    }

    fn description(&self) -> &'static str {
        "Shows entity modularity level"
    }

    fn depends_on(&self) -> &[MetricId] {
        &[INSTABILITY, LCOM, MODULE_COHESION]
    }
}

impl EntityMetric for Modularity {
    fn applicable_kinds(&self) -> &[EntityKind] {
        &EntityKind::ALL
    }

    fn compute(&self, ctx: &EntityContext<'_>) -> Result<f64, MetricError> {
        let stability = 1.0 - ctx.dependency(INSTABILITY)?;

        match ctx.kind() {
            EntityKind::Class => {
                let cohesion = 1.0 - ctx.dependency(LCOM)?;
                Ok(stability * cohesion)
            }
            EntityKind::Namespace | EntityKind::File => {
                Ok(stability * ctx.dependency(MODULE_COHESION)?)
            }
            _ => Ok(stability),
        }
    }
}
