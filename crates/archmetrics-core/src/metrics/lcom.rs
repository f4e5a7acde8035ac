use super::{EntityContext, EntityMetric, MetricError, MetricId, MetricInfo};
use crate::protocol::EntityKind;

pub const LCOM: MetricId = "LCOM";

/// Lack of Cohesion Of Methods.
///
/// `1 - S / (behaviours * fields)` where `S` counts, for every data child
/// (deep), the behaviour children (one level) it is used by. A class without
/// data scores 1, a class with data but without behaviour scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lcom;

impl MetricInfo for Lcom {
    fn id(&self) -> MetricId {
        LCOM
    }

    fn name(&self) -> &'static str {
        "LCOM"
    }

    fn description(&self) -> &'static str {
        "Lack of Cohesion Of Methods"
    }
}

impl EntityMetric for Lcom {
    fn applicable_kinds(&self) -> &[EntityKind] {
        &[EntityKind::Class]
    }

    fn compute(&self, ctx: &EntityContext<'_>) -> Result<f64, MetricError> {
        let traversal = &ctx.traversal;

        let fields: Vec<_> = traversal
            .children_deep(ctx.node)
            .into_iter()
            .filter(|child| traversal.is_data(*child))
            .collect();
        if fields.is_empty() {
            return Ok(1.0);
        }

        let behaviours: Vec<_> = traversal
            .children(ctx.node)
            .into_iter()
            .filter(|child| traversal.is_collable(*child))
            .collect();
        if behaviours.is_empty() {
            return Ok(0.0);
        }

        let shared: usize = fields
            .iter()
            .map(|field| {
                behaviours
                    .iter()
                    .filter(|behaviour| traversal.used_by(*field, **behaviour))
                    .count()
            })
            .sum();

        Ok(1.0 - shared as f64 / (behaviours.len() * fields.len()) as f64)
    }
}
