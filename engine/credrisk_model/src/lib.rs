//! Scorer abstraction and pluggable backends for credrisk.
//!
//! The prediction pipeline only depends on the [`Scorer`] trait. Trained
//! models are shipped as JSON artifacts and rebuilt into one of the backends
//! in [`backends`] by [`load_scorer`].

pub mod artifact;
pub mod backends;
pub mod scorer;

pub use artifact::{load_scorer, ArtifactError, ScorerArtifact};
pub use backends::{ForestScorer, LogisticScorer, Node, Tree};
pub use scorer::{check_input, check_probability, Scorer, ScorerError};
