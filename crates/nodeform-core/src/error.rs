//! Error types for tree mutation and format codecs.

use thiserror::Error;

/// Errors that can occur while mutating a node tree or running a codec.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A node key was empty, whitespace-only, or already present.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A property path was empty or contained a malformed segment.
    #[error("invalid property path: {0}")]
    InvalidPath(String),

    /// A path segment already holds a scalar value where a node is
    /// required. The payload is the dotted prefix up to and including the
    /// conflicting segment.
    #[error("property '{path}' has already been assigned a scalar value and cannot be a node")]
    PathConflict { path: String },

    /// A non-scalar value where one of the fixed scalar kinds was required,
    /// including inside a bulk-added sequence.
    #[error("invalid scalar type: {0}")]
    InvalidScalarType(String),

    /// A stored value's kind did not match the requested read type.
    #[error("type mismatch: requested {expected}, stored value is {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Conflicting codec configuration, detected when options are built.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The operation was aborted through a cancellation token.
    #[error("operation cancelled")]
    Cancelled,

    /// The codec does not implement this direction (e.g. YAML export).
    #[error("the {format} format does not support {operation}")]
    Unsupported {
        format: &'static str,
        operation: &'static str,
    },

    /// The input was structurally unusable for the codec, e.g. a JSON
    /// document whose root is not an object.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// The input was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was not valid XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The input was not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A stream read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout nodeform-core.
pub type Result<T> = std::result::Result<T, ModelError>;
