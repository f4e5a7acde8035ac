use thiserror::Error;

/// Errors raised while decoding a protocol document.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("JSON protocol error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML protocol error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
