use thiserror::Error;

/// Errors raised while resolving or computing metrics.
///
/// All of them point at a misconfigured metric set rather than bad input, and
/// all of them abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("Metric {metric} needs {dependency} for entity {entity_id}, which has not been computed")]
    MissingDependency {
        metric: String,
        dependency: String,
        entity_id: String,
    },

    #[error("Metric {metric} depends on unregistered metric {dependency}")]
    UnknownDependency { metric: String, dependency: String },

    #[error("Metric dependency cycle involving {metric}")]
    DependencyCycle { metric: String },

    #[error("Metric registered twice: {0}")]
    DuplicateMetric(String),
}
