//! Logistic regression backend: p = sigmoid(w·x + b)

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactError;
use crate::scorer::{check_input, check_probability, Scorer, ScorerError};

/// Logistic function
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticScorer {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_name() -> String {
    "logistic".to_string()
}

impl LogisticScorer {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            name: default_name(),
            feature_names: Vec::new(),
            coefficients,
            intercept,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = names;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.is_empty() {
            return Err(ArtifactError::Invalid("logistic model has no coefficients".into()));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.coefficients.len() {
            return Err(ArtifactError::Invalid(format!(
                "logistic model has {} coefficients but {} feature names",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::Invalid("logistic model has non-finite weights".into()));
        }
        Ok(())
    }
}

impl Scorer for LogisticScorer {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ScorerError> {
        check_input(features, self.coefficients.len())?;
        let z = features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;
        check_probability(sigmoid(z))
    }

    fn feature_names(&self) -> Option<&[String]> {
        (!self.feature_names.is_empty()).then_some(self.feature_names.as_slice())
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}
