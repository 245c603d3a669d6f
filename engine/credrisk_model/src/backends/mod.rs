//! Scorer backends that can be reconstructed from JSON artifacts

pub mod forest;
pub mod logistic;

pub use forest::{ForestScorer, Node, Tree};
pub use logistic::LogisticScorer;
