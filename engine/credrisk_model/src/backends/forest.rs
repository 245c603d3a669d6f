//! Random forest backend evaluated from exported decision trees.
//!
//! Each tree is a flat node array rooted at index 0. Split nodes send a row
//! left when `x[feature] <= threshold`. Leaves hold the fraction of positive
//! training samples that reached them; the forest probability is the mean
//! over trees.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactError;
use crate::scorer::{check_input, check_probability, Scorer, ScorerError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn leaf_value(&self, features: &[f64]) -> Option<f64> {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx)? {
                Node::Leaf { value } => return Some(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if *features.get(*feature)? <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
        None
    }

    /// Children must point forward so evaluation always terminates.
    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ArtifactError> {
        let invalid = |node: usize, what: String| {
            ArtifactError::Invalid(format!("tree {tree} node {node}: {what}"))
        };
        if self.nodes.is_empty() {
            return Err(ArtifactError::Invalid(format!("tree {tree} has no nodes")));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { value } => {
                    if !(0.0..=1.0).contains(value) {
                        return Err(invalid(i, format!("leaf value {value} outside [0, 1]")));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(invalid(i, format!("feature index {feature} out of range")));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(i, "non-finite threshold".into()));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(invalid(i, format!("child {child} is not a later node")));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestScorer {
    #[serde(default = "default_name")]
    pub name: String,
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub trees: Vec<Tree>,
}

fn default_name() -> String {
    "random_forest".to_string()
}

impl ForestScorer {
    pub fn new(n_features: usize, trees: Vec<Tree>) -> Self {
        Self {
            name: default_name(),
            n_features,
            feature_names: Vec::new(),
            trees,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid("forest has no trees".into()));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.n_features {
            return Err(ArtifactError::Invalid(format!(
                "forest declares {} features but lists {} names",
                self.n_features,
                self.feature_names.len()
            )));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        Ok(())
    }
}

impl Scorer for ForestScorer {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ScorerError> {
        check_input(features, self.n_features)?;
        if self.trees.is_empty() {
            return Err(ScorerError::Inference("forest has no trees".into()));
        }
        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree
                .leaf_value(features)
                .ok_or_else(|| ScorerError::Inference(format!("tree {i} is malformed")))?;
        }
        check_probability(total / self.trees.len() as f64)
    }

    fn feature_names(&self) -> Option<&[String]> {
        (!self.feature_names.is_empty()).then_some(self.feature_names.as_slice())
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}
