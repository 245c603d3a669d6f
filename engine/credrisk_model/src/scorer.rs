//! Scorer trait and error types for probability inference

use thiserror::Error;

/// Errors that can occur while scoring a feature row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScorerError {
    #[error("scorer expects {expected} features, got {found}")]
    InputWidth { expected: usize, found: usize },
    #[error("feature {index} is not finite")]
    NonFiniteInput { index: usize },
    #[error("scorer produced an invalid probability: {0}")]
    InvalidOutput(f64),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A fitted binary classifier.
///
/// Implementations must be deterministic for a fixed input and are shared
/// across request threads, hence `Send + Sync`.
pub trait Scorer: Send + Sync {
    /// Probability of the positive class (default) for one feature row.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ScorerError>;

    /// Column names the scorer was fit on, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Model name recorded in the artifact; defaults to the backend kind.
    fn backend_name(&self) -> &str;
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ScorerError> {
        (**self).predict_proba(features)
    }

    fn feature_names(&self) -> Option<&[String]> {
        (**self).feature_names()
    }

    fn backend_name(&self) -> &str {
        (**self).backend_name()
    }
}

/// Reject rows of the wrong width or containing NaN/inf.
pub fn check_input(features: &[f64], expected: usize) -> Result<(), ScorerError> {
    if features.len() != expected {
        return Err(ScorerError::InputWidth {
            expected,
            found: features.len(),
        });
    }
    match features.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(ScorerError::NonFiniteInput { index }),
        None => Ok(()),
    }
}

/// Accept only finite probabilities in `[0, 1]`.
pub fn check_probability(p: f64) -> Result<f64, ScorerError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ScorerError::InvalidOutput(p))
    }
}
