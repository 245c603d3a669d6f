//! Offline scoring of a single record read from a file or stdin

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use credrisk_core::{predict_json, round_probability, PredictionResult, ServingContext};
use serde_json::Value;

use crate::error::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn read_record(path: Option<&PathBuf>) -> Result<Value, ServerError> {
    let text = match path {
        Some(p) => fs::read_to_string(p).map_err(|e| ServerError::input(path, e))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ServerError::input(None, e))?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

pub fn score(ctx: &ServingContext, record: Value, mode: OutputMode) -> Result<String, ServerError> {
    let result = predict_json(ctx, record)?;
    render(&result, mode)
}

pub fn render(result: &PredictionResult, mode: OutputMode) -> Result<String, ServerError> {
    Ok(match mode {
        OutputMode::Json => serde_json::to_string_pretty(result).map_err(ServerError::Output)?,
        OutputMode::Text => format!(
            "Predicted Class: {}\nProbability: {} | Threshold: {}",
            result.predicted_class.as_u8(),
            round_probability(result.probability),
            result.threshold
        ),
    })
}
