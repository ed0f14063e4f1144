//! Error types for the schema module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while loading or resolving rules.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Malformed rule {rule}: {message}")]
    MalformedRule { rule: String, message: String },

    #[error("Rule file not found at path: {0}")]
    NotFound(PathBuf),

    #[error("Node type {name} is defined more than once (again in {path})")]
    DuplicateRule { name: String, path: PathBuf },

    #[error("Invalid rule file format in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
