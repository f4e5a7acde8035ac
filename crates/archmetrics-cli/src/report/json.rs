//! Machine-readable report.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use archmetrics_core::{Analysis, EntityKind, MetricValues};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub entities: Vec<EntityReport<'a>>,
    pub groups: Vec<GroupReport<'a>>,
    pub global: &'a MetricValues,
}

#[derive(Debug, Serialize)]
pub struct EntityReport<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub kind: EntityKind,
    pub metrics: &'a MetricValues,
}

#[derive(Debug, Serialize)]
pub struct GroupReport<'a> {
    pub kind: EntityKind,
    pub name: &'static str,
    pub metrics: &'a MetricValues,
}

impl<'a> JsonReport<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self::at(analysis, Utc::now())
    }

    /// Report stamped with a fixed time.
    pub fn at(analysis: &'a Analysis, generated_at: DateTime<Utc>) -> Self {
        let graph = &analysis.graph;
        let entities = analysis
            .metrics
            .entities()
            .filter_map(|(id, metrics)| {
                let node = &graph[graph.find(id)?];
                Some(EntityReport {
                    id,
                    name: &node.name,
                    kind: node.kind(),
                    metrics,
                })
            })
            .collect();
        let groups = analysis
            .metrics
            .groups()
            .map(|(kind, metrics)| GroupReport {
                kind,
                name: kind.group_name(),
                metrics,
            })
            .collect();

        Self {
            generated_at,
            entities,
            groups,
            global: analysis.metrics.global(),
        }
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}
