use super::{EntityContext, EntityMetric, MetricError, MetricId, MetricInfo};
use crate::protocol::{EntityKind, RelationKind};

pub const INSTABILITY: MetricId = "Instability";

/// Share of outgoing dependencies among all dependencies of a node and its
/// deep children.
///
/// Relations are classified relative to the member they are attached to. For
/// EXTENDS and IMPLEMENTS the member is the dependent side when it is the
/// `from` endpoint; for USED_BY when it is the `to` endpoint. Everything else
/// is incoming. Containment is ignored. Only relations inside the analyzed
/// codebase exist in the graph, so the score is internal instability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instability;

impl MetricInfo for Instability {
    fn id(&self) -> MetricId {
        INSTABILITY
    }

    fn name(&self) -> &'static str {
        "Instability"
    }

    fn description(&self) -> &'static str {
        "Describe how often component may require changes"
    }
}

impl EntityMetric for Instability {
    fn applicable_kinds(&self) -> &[EntityKind] {
        &EntityKind::ALL
    }

    fn compute(&self, ctx: &EntityContext<'_>) -> Result<f64, MetricError> {
        let graph = ctx.graph();
        let mut incoming = 0usize;
        let mut outgoing = 0usize;

        for member in ctx.traversal.with_children_deep(ctx.node) {
            for relation in graph.relations_of(member) {
                let dependent = match relation.kind {
                    RelationKind::Extends | RelationKind::Implements => relation.from,
                    RelationKind::UsedBy => relation.to,
                    RelationKind::ChildrenOf => continue,
                };
                if dependent == member {
                    outgoing += 1;
                } else {
                    incoming += 1;
                }
            }
        }

        if incoming + outgoing == 0 {
            return Ok(0.0);
        }
        Ok(outgoing as f64 / (incoming + outgoing) as f64)
    }
}
