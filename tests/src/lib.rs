//! Shared fixtures for the credrisk integration tests.

use std::fs;
use std::path::Path;

use credrisk_core::{DecisionPolicy, ServingContext};
use credrisk_encode::{CategoryTable, EncoderSet, FeatureAssembler, ARTIFACT_FILES};
use credrisk_model::{LogisticScorer, Scorer, ScorerError};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Category tables as fitted on the training data.
pub fn training_tables() -> Vec<CategoryTable> {
    let table = |feature: &str, categories: &[&str]| {
        CategoryTable::new(feature, categories.iter().copied()).expect("valid table")
    };
    vec![
        table("home_ownership", &["MORTGAGE", "OTHER", "OWN", "RENT"]),
        table(
            "loan_intent",
            &[
                "DEBTCONSOLIDATION",
                "EDUCATION",
                "HOMEIMPROVEMENT",
                "MEDICAL",
                "PERSONAL",
                "VENTURE",
            ],
        ),
        table("loan_grade", &["A", "B", "C", "D", "E", "F", "G"]),
        table("default_onfile", &["N", "Y"]),
    ]
}

pub fn training_encoders() -> EncoderSet {
    EncoderSet::from_tables(training_tables())
}

/// Assembled column names for the training encoders.
pub fn training_columns() -> Vec<String> {
    FeatureAssembler::new(training_encoders())
        .expect("training encoders assemble")
        .layout()
        .columns()
        .to_vec()
}

/// Returns the same probability for every row, recording nothing.
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub f64);

impl Scorer for FixedScorer {
    fn predict_proba(&self, _features: &[f64]) -> Result<f64, ScorerError> {
        Ok(self.0)
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}

/// Fails every call after the start-up probe.
#[derive(Debug, Default)]
pub struct FailingScorer {
    calls: std::sync::atomic::AtomicUsize,
}

impl Scorer for FailingScorer {
    fn predict_proba(&self, _features: &[f64]) -> Result<f64, ScorerError> {
        use std::sync::atomic::Ordering;
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(0.5)
        } else {
            Err(ScorerError::Inference("backend unavailable".into()))
        }
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

pub fn context_with(scorer: impl Scorer + 'static, threshold: f64) -> ServingContext {
    let policy = DecisionPolicy::new(threshold).expect("valid threshold");
    ServingContext::new(training_encoders(), Box::new(scorer), policy).expect("context builds")
}

/// A logistic scorer over the training layout with the given weights.
pub fn logistic(coefficients: Vec<f64>, intercept: f64) -> LogisticScorer {
    LogisticScorer::new(coefficients, intercept).with_feature_names(training_columns())
}

/// The example application used throughout the API docs.
pub fn sample_record() -> Value {
    json!({
        "person_age": 22,
        "person_income": 59000,
        "person_home_ownership": "RENT",
        "person_emp_lenght": 123.0,
        "loan_intent": "PERSONAL",
        "loan_grade": "D",
        "loan_amnt": 35000,
        "loan_int_rate": 16.02,
        "loan_percent_income": 0.59,
        "loan_status": 1,
        "cb_person_default_on_file": "Y",
        "cb_person_cred_hist_length": 3
    })
}

/// Write the four encoder artifacts plus `scorer.json` into a fresh directory.
pub fn write_artifacts(scorer: &Value) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for table in training_tables() {
        let file = ARTIFACT_FILES
            .iter()
            .find(|(column, _)| *column == table.feature())
            .map(|(_, file)| *file)
            .unwrap_or_else(|| panic!("no artifact file for {}", table.feature()));
        write_json(&dir.path().join(file), &json!(table));
    }
    write_json(&dir.path().join("scorer.json"), scorer);
    dir
}

pub fn write_json(path: &Path, value: &Value) {
    let text = serde_json::to_string_pretty(value).expect("serialize artifact");
    fs::write(path, text).expect("write artifact");
}
