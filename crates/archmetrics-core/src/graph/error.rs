use thiserror::Error;

/// Referential-integrity failures detected while building a graph.
///
/// Both variants mean the protocol is broken upstream; the build is aborted
/// and no partial graph is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Relation {relation_id} references unknown entity: {entity_id}")]
    UnknownRelationEndpoint {
        relation_id: String,
        entity_id: String,
    },

    #[error("Entity {entity_id} references unknown parent file: {file_id}")]
    UnknownParentFile { entity_id: String, file_id: String },
}
