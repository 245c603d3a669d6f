//! Process-wide serving context.
//!
//! Everything a request needs that outlives the request: the fitted encoders,
//! the scorer and the decision policy. Built once at start-up, then shared
//! read-only (typically behind an `Arc`) by all request handlers.

use std::path::Path;

use credrisk_encode::{EncoderSet, FeatureAssembler, FeatureLayout};
use credrisk_model::{check_probability, load_scorer, Scorer};

use crate::decision::DecisionPolicy;
use crate::error::ContextError;

pub struct ServingContext {
    assembler: FeatureAssembler,
    scorer: Box<dyn Scorer>,
    policy: DecisionPolicy,
}

impl ServingContext {
    /// Wire the components together, refusing to start if the scorer was fit
    /// on a layout other than the one feature assembly produces.
    pub fn new(
        encoders: EncoderSet,
        scorer: Box<dyn Scorer>,
        policy: DecisionPolicy,
    ) -> Result<Self, ContextError> {
        let assembler = FeatureAssembler::new(encoders)?;
        check_layout(assembler.layout(), scorer.as_ref())?;
        log::info!(
            "serving context ready: {} features, {} scorer, threshold {}",
            assembler.layout().len(),
            scorer.backend_name(),
            policy.threshold()
        );
        Ok(Self {
            assembler,
            scorer,
            policy,
        })
    }

    /// Load encoder artifacts from `dir` and the scorer from `dir/scorer_file`.
    pub fn load(
        dir: impl AsRef<Path>,
        scorer_file: impl AsRef<Path>,
        policy: DecisionPolicy,
    ) -> Result<Self, ContextError> {
        let dir = dir.as_ref();
        log::info!("loading artifacts from {}", dir.display());
        let encoders = EncoderSet::load_dir(dir)?;
        let scorer = load_scorer(dir.join(scorer_file))?;
        Self::new(encoders, scorer, policy)
    }

    pub fn assembler(&self) -> &FeatureAssembler {
        &self.assembler
    }

    pub fn layout(&self) -> &FeatureLayout {
        self.assembler.layout()
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.policy
    }
}

impl std::fmt::Debug for ServingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServingContext")
            .field("layout", &self.assembler.layout().len())
            .field("scorer", &self.scorer.backend_name())
            .field("policy", &self.policy)
            .finish()
    }
}

fn check_layout(layout: &FeatureLayout, scorer: &dyn Scorer) -> Result<(), ContextError> {
    match scorer.feature_names() {
        Some(trained) => {
            if let Some(position) = layout.first_mismatch(trained) {
                return Err(ContextError::SchemaMismatch {
                    position,
                    trained: trained.get(position).cloned(),
                    assembled: layout.columns().get(position).cloned(),
                });
            }
        }
        None => log::warn!(
            "{} scorer does not record its feature names; only the width is checked",
            scorer.backend_name()
        ),
    }
    // A zero row of the assembled width must score to a valid probability.
    scorer
        .predict_proba(&vec![0.0; layout.len()])
        .and_then(check_probability)
        .map(|_| ())
        .map_err(ContextError::Probe)
}
