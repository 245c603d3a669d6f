//! Error taxonomy surfaced by the prediction pipeline

use credrisk_encode::{AssembleError, EncodingError, SchemaError, TableError};
use credrisk_model::{ArtifactError, ScorerError};
use thiserror::Error;

/// Why a single prediction request was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("scorer error: {0}")]
    Scorer(#[from] ScorerError),
}

impl From<AssembleError> for PredictError {
    fn from(err: AssembleError) -> Self {
        match err {
            AssembleError::Schema(e) => PredictError::Schema(e),
            AssembleError::Encoding(e) => PredictError::Encoding(e),
        }
    }
}

/// Coarse error class, used for status codes and error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    Encoding,
    Scorer,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Schema => "schema",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Scorer => "scorer",
        }
    }
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::Schema(_) => ErrorKind::Schema,
            PredictError::Encoding(_) => ErrorKind::Encoding,
            PredictError::Scorer(_) => ErrorKind::Scorer,
        }
    }

    /// Schema and encoding failures are the caller's fault; scorer failures
    /// are ours.
    pub fn is_bad_input(&self) -> bool {
        !matches!(self, PredictError::Scorer(_))
    }
}

/// Start-up failure while building the serving context.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(
        "scorer was trained on a different feature layout: column {position} is {trained:?}, \
         assembly produces {assembled:?}"
    )]
    SchemaMismatch {
        position: usize,
        trained: Option<String>,
        assembled: Option<String>,
    },
    #[error("scorer rejected a row of the assembled width: {0}")]
    Probe(ScorerError),
}
