use indexmap::IndexMap;
use serde::Serialize;

use crate::metrics::MetricId;
use crate::protocol::EntityKind;

/// Metric id to value, in metric execution order.
pub type MetricValues = IndexMap<MetricId, f64>;

/// Values produced by one analyser run.
///
/// Three independent tiers: per entity id, per entity kind and global. Every
/// map keeps insertion order, which follows graph order and metric order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    entities: IndexMap<String, MetricValues>,
    groups: IndexMap<EntityKind, MetricValues>,
    global: MetricValues,
}

impl AnalyticsResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// All values computed for one entity.
    pub fn entity(&self, id: &str) -> Option<&MetricValues> {
        self.entities.get(id)
    }

    pub fn entity_value(&self, id: &str, metric: &str) -> Option<f64> {
        self.entities.get(id)?.get(metric).copied()
    }

    pub fn entities(&self) -> impl Iterator<Item = (&str, &MetricValues)> + '_ {
        self.entities.iter().map(|(id, values)| (id.as_str(), values))
    }

    pub fn group(&self, kind: EntityKind) -> Option<&MetricValues> {
        self.groups.get(&kind)
    }

    pub fn group_value(&self, kind: EntityKind, metric: &str) -> Option<f64> {
        self.groups.get(&kind)?.get(metric).copied()
    }

    pub fn groups(&self) -> impl Iterator<Item = (EntityKind, &MetricValues)> + '_ {
        self.groups.iter().map(|(kind, values)| (*kind, values))
    }

    pub fn global(&self) -> &MetricValues {
        &self.global
    }

    pub fn global_value(&self, metric: &str) -> Option<f64> {
        self.global.get(metric).copied()
    }

    /// Whether nothing was computed.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.groups.is_empty() && self.global.is_empty()
    }

    pub(crate) fn insert_entity(&mut self, id: &str, metric: MetricId, value: f64) {
        match self.entities.get_mut(id) {
            Some(values) => {
                values.insert(metric, value);
            }
            None => {
                let mut values = MetricValues::new();
                values.insert(metric, value);
                self.entities.insert(id.to_string(), values);
            }
        }
    }

    pub(crate) fn insert_group(&mut self, kind: EntityKind, metric: MetricId, value: f64) {
        self.groups.entry(kind).or_default().insert(metric, value);
    }

    pub(crate) fn insert_global(&mut self, metric: MetricId, value: f64) {
        self.global.insert(metric, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_independent() {
        let mut result = AnalyticsResult::new();
        assert!(result.is_empty());

        result.insert_entity("a", "M", 0.5);
        result.insert_group(EntityKind::Class, "M", 0.25);
        result.insert_global("G", 1.0);

        assert_eq!(result.entity_value("a", "M"), Some(0.5));
        assert_eq!(result.entity_value("b", "M"), None);
        assert_eq!(result.group_value(EntityKind::Class, "M"), Some(0.25));
        assert_eq!(result.group(EntityKind::File), None);
        assert_eq!(result.global_value("G"), Some(1.0));
        assert_eq!(result.global_value("M"), None);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut result = AnalyticsResult::new();
        result.insert_entity("b", "First", 0.0);
        result.insert_entity("a", "First", 0.0);
        result.insert_entity("b", "Second", 1.0);

        let ids: Vec<_> = result.entities().map(|(id, _)| id).collect();
        assert_eq!(ids, ["b", "a"]);
        let metrics: Vec<_> = result.entity("b").unwrap().keys().copied().collect();
        assert_eq!(metrics, ["First", "Second"]);
    }

    #[test]
    fn test_serializes_groups_by_kind_name() {
        let mut result = AnalyticsResult::new();
        result.insert_group(EntityKind::FunctionVariable, "M", 1.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["groups"]["FunctionVariable"]["M"], 1.0);
    }
}
