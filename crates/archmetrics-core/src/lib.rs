pub mod analyser;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod protocol;
pub mod traversal;

pub use analyser::{analyse_architecture, Analyser, Analysis, AnalyticsResult, MetricValues};
pub use config::{Config, ConfigError, ReportFormat};
pub use error::AnalysisError;
pub use graph::{Graph, GraphError, Node, NodeIndex};
pub use metrics::{MetricDefinition, MetricError, MetricId, MetricRegistry, PartitionStrategy};
pub use protocol::{EntityKind, Protocol, ProtocolError, Relation, RelationKind};
pub use traversal::{ContainmentMode, Traversal};
