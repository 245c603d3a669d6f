//! Probability-to-class decision policy

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Cutoff used when no threshold is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Predicted class. `Positive` means the applicant is expected to default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLabel {
    Negative,
    Positive,
}

impl ClassLabel {
    pub fn as_u8(self) -> u8 {
        match self {
            ClassLabel::Negative => 0,
            ClassLabel::Positive => 1,
        }
    }
}

impl Serialize for ClassLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DecisionError {
    #[error("threshold must be a finite value in [0, 1], got {0}")]
    InvalidThreshold(f64),
}

/// `1` iff `probability >= threshold`. A probability equal to the threshold
/// is positive.
pub fn decide(probability: f64, threshold: f64) -> ClassLabel {
    if probability >= threshold {
        ClassLabel::Positive
    } else {
        ClassLabel::Negative
    }
}

/// A validated, fixed decision threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DecisionPolicy {
    threshold: f64,
}

impl DecisionPolicy {
    pub fn new(threshold: f64) -> Result<Self, DecisionError> {
        if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
            Ok(Self { threshold })
        } else {
            Err(DecisionError::InvalidThreshold(threshold))
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn decide(&self, probability: f64) -> ClassLabel {
        decide(probability, self.threshold)
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl TryFrom<f64> for DecisionPolicy {
    type Error = DecisionError;

    fn try_from(threshold: f64) -> Result<Self, Self::Error> {
        Self::new(threshold)
    }
}

impl From<DecisionPolicy> for f64 {
    fn from(policy: DecisionPolicy) -> f64 {
        policy.threshold
    }
}
