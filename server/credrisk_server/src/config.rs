//! Service configuration read from a TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8000"
//!
//! [artifacts]
//! dir = "models"
//! scorer = "scorer.json"
//!
//! [decision]
//! threshold = 0.4
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use credrisk_core::{DecisionError, DecisionPolicy, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Threshold(#[from] DecisionError),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub server: ServerSection,
    pub artifacts: ArtifactSection,
    pub decision: DecisionSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactSection {
    /// Directory holding the encoder artifacts and the scorer.
    pub dir: PathBuf,
    /// Scorer file name, relative to `dir`.
    pub scorer: PathBuf,
}

impl Default for ArtifactSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            scorer: PathBuf::from("scorer.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionSection {
    pub threshold: f64,
}

impl Default for DecisionSection {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(text)?;
        config.policy()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn policy(&self) -> Result<DecisionPolicy, ConfigError> {
        Ok(DecisionPolicy::new(self.decision.threshold)?)
    }
}
