//! The per-request prediction pipeline:
//! validate → rename → encode → assemble → score → threshold.

use credrisk_encode::RawRecord;
use credrisk_model::check_probability;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::context::ServingContext;
use crate::decision::ClassLabel;
use crate::error::PredictError;

/// Outcome of scoring one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Unrounded in memory; serialized to 4 decimals.
    #[serde(serialize_with = "serialize_rounded")]
    pub probability: f64,
    pub threshold: f64,
    pub predicted_class: ClassLabel,
}

/// Round a probability to the 4 decimals reported to callers.
pub fn round_probability(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}

fn serialize_rounded<S: Serializer>(p: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_probability(*p))
}

pub fn predict(ctx: &ServingContext, record: &RawRecord) -> Result<PredictionResult, PredictError> {
    let features = ctx.assembler().assemble(record)?;
    // The scorer is opaque; its output is checked here before any decision.
    let probability = check_probability(ctx.scorer().predict_proba(features.as_slice())?)?;
    let policy = ctx.policy();
    Ok(PredictionResult {
        probability,
        threshold: policy.threshold(),
        predicted_class: policy.decide(probability),
    })
}

/// Convenience entry point for callers holding a parsed JSON body.
pub fn predict_json(ctx: &ServingContext, body: Value) -> Result<PredictionResult, PredictError> {
    let record = RawRecord::from_json(body)?;
    predict(ctx, &record)
}

impl ServingContext {
    pub fn predict(&self, record: &RawRecord) -> Result<PredictionResult, PredictError> {
        predict(self, record)
    }
}
