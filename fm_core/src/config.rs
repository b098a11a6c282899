use std::num::NonZeroUsize;

use crate::{
    loss::LearningMode,
    model::Clip,
    sgd::{FmSgd, Regularization},
};

/// Hyperparameters for one factorization machine training run: objective,
/// model shape, epoch budget, step size, the per-group L2 coefficients,
/// factor initialization spread and the prediction clip bounds.
#[derive(Debug, Clone, Copy)]
pub struct FmConfig {
    pub mode: LearningMode,
    pub num_features: usize,
    pub epochs: NonZeroUsize,
    pub rank: NonZeroUsize,
    pub learning_rate: f32,
    pub reg: Regularization,
    pub init_std_dev: f32,
    pub clip: Clip,
}

impl FmConfig {
    /// Builds the update rule this configuration describes.
    pub fn updater(&self) -> FmSgd {
        FmSgd::new(self.mode, self.learning_rate, self.reg, self.clip)
    }
}
