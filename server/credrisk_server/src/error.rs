use std::path::PathBuf;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use credrisk_core::{ContextError, PredictError};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end the process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load model artifacts: {0}")]
    Context(#[from] ContextError),
    #[error("failed to read record from {source_name}: {source}")]
    Input {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render prediction: {0}")]
    Output(#[source] serde_json::Error),
    #[error("prediction failed: {0}")]
    Predict(#[from] PredictError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    pub fn input(path: Option<&PathBuf>, source: std::io::Error) -> Self {
        ServerError::Input {
            source_name: path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdin".to_string()),
            source,
        }
    }
}

/// A rejected HTTP request, rendered as
/// `{"error": {"kind": ..., "message": ...}}`.
#[derive(Debug)]
pub enum ApiError {
    Malformed(JsonRejection),
    Predict(PredictError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Malformed(rejection) => rejection.status(),
            ApiError::Predict(e) if e.is_bad_input() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Predict(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn payload(&self) -> Value {
        let (kind, message) = match self {
            ApiError::Malformed(rejection) => ("request", rejection.body_text()),
            ApiError::Predict(e) => (e.kind().as_str(), e.to_string()),
        };
        json!({ "error": { "kind": kind, "message": message } })
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection)
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        ApiError::Predict(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.payload())).into_response()
    }
}
