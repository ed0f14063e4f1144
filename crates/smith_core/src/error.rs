//! Error types for the core module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while constructing or handling nodes.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Unknown node types and malformed rules.
    #[error(transparent)]
    Schema(#[from] smith_schema::SchemaError),

    #[error("Input ended before the node was complete")]
    InputExhausted,

    #[error("Node {node} does not satisfy its rules: {}", .problems.join("; "))]
    SchemaIncomplete { node: String, problems: Vec<String> },

    #[error("Unsupported node file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    pub fn is_unknown_node_type(&self) -> bool {
        matches!(self, CoreError::Schema(smith_schema::SchemaError::UnknownNodeType(_)))
    }

    pub fn is_malformed_rule(&self) -> bool {
        matches!(self, CoreError::Schema(smith_schema::SchemaError::MalformedRule { .. }))
    }
}
