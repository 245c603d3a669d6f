//! Error types for record validation, encoding and encoder artifacts

use std::path::PathBuf;
use thiserror::Error;

/// The incoming record does not have the shape the model was trained on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field {field} expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },
}

/// A categorical value could not be turned into its one-hot block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("unknown category {value:?} for {feature} (known: {})", known.join(", "))]
    UnknownCategory {
        feature: String,
        value: String,
        known: Vec<String>,
    },
    #[error("no encoder fitted for feature {0}")]
    UnknownFeature(String),
}

/// Failure while loading or validating a fitted category table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read encoder artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed encoder artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("category table for {0} is empty")]
    Empty(String),
    #[error("category table for {feature} lists {category:?} more than once")]
    DuplicateCategory { feature: String, category: String },
    #[error("no encoder provided for categorical column {0}")]
    MissingEncoder(String),
}

/// Anything that can go wrong while assembling a feature vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
