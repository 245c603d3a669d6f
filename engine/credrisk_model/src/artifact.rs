//! Loading scorer artifacts exported by the training pipeline

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backends::{ForestScorer, LogisticScorer};
use crate::scorer::Scorer;

/// Errors that can occur while loading a scorer artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read scorer artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scorer artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid scorer artifact: {0}")]
    Invalid(String),
}

/// On-disk scorer representation, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorerArtifact {
    Logistic(LogisticScorer),
    RandomForest(ForestScorer),
}

impl ScorerArtifact {
    pub fn from_json_str(text: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            ScorerArtifact::Logistic(m) => m.validate(),
            ScorerArtifact::RandomForest(m) => m.validate(),
        }
    }

    pub fn into_scorer(self) -> Result<Box<dyn Scorer>, ArtifactError> {
        self.validate()?;
        Ok(match self {
            ScorerArtifact::Logistic(m) => Box::new(m),
            ScorerArtifact::RandomForest(m) => Box::new(m),
        })
    }
}

/// Read, validate and instantiate the scorer stored at `path`.
pub fn load_scorer(path: impl AsRef<Path>) -> Result<Box<dyn Scorer>, ArtifactError> {
    let path = path.as_ref();
    let text = read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scorer = ScorerArtifact::from_json_str(&text)?.into_scorer()?;
    log::info!(
        "loaded {} scorer from {}",
        scorer.backend_name(),
        path.display()
    );
    Ok(scorer)
}
