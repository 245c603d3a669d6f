//! Loan default prediction pipeline.
//!
//! [`ServingContext`] holds the fitted encoders, the scorer and the
//! [`DecisionPolicy`]; [`predict`] runs one record through
//! validate → rename → encode → assemble → score → threshold.

pub mod context;
pub mod decision;
pub mod error;
pub mod pipeline;

pub use context::ServingContext;
pub use decision::{decide, ClassLabel, DecisionError, DecisionPolicy, DEFAULT_THRESHOLD};
pub use error::{ContextError, ErrorKind, PredictError};
pub use pipeline::{predict, predict_json, round_probability, PredictionResult};
