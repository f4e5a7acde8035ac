use thiserror::Error;

use crate::graph::GraphError;
use crate::metrics::MetricError;

/// Failure of an analysis run.
///
/// No partial result survives an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),
}
