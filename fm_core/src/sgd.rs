use crate::{
    loss::LearningMode,
    model::{Clip, FmParams},
    sparse::SparseVector,
};

/// L2 regularization coefficients, one per parameter group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regularization {
    pub bias: f32,
    pub linear: f32,
    pub factor: f32,
}

impl Regularization {
    pub fn new(bias: f32, linear: f32, factor: f32) -> Self {
        Self {
            bias,
            linear,
            factor,
        }
    }

    /// No regularization on any group.
    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Stochastic gradient descent update rule for the factorization machine
/// objective.
#[derive(Debug, Clone)]
pub struct FmSgd {
    pub mode: LearningMode,
    pub learning_rate: f32,
    pub reg: Regularization,
    pub clip: Clip,
}

impl FmSgd {
    pub fn new(mode: LearningMode, learning_rate: f32, reg: Regularization, clip: Clip) -> Self {
        Self {
            mode,
            learning_rate,
            reg,
            clip,
        }
    }

    /// Applies one instance's update to `params` in place.
    ///
    /// Order matters in two places. The linear weights are decayed as a
    /// whole vector before the sparse gradient lands on the active entries,
    /// so untouched weights still shrink. And each factor dimension's
    /// interaction sum is taken from the pre-update rows, keeping the
    /// per-entry updates logically simultaneous even though they are
    /// written sequentially.
    ///
    /// # Panics
    /// If a feature in `x` has no factor row in `params`.
    pub fn step(&self, params: &mut FmParams, x: &SparseVector, target: f32) {
        let lr = self.learning_rate;
        let prediction = params.predict(x, self.clip);
        let dm = self.mode.multiplier(prediction, target);

        params.bias -= lr * (dm + self.reg.bias * params.bias);

        let decay = 1.0 - lr * self.reg.linear;
        params.weights.mapv_inplace(|w| w * decay);
        x.scaled_add_to(-lr * dm, &mut params.weights);

        for f in 0..params.factors.rank() {
            let dot_f: f32 = x.iter().map(|(j, v)| v * params.factors.row(j)[f]).sum();

            for (j, v) in x.iter() {
                let row = params.factors.row_mut(j);
                let grad = dot_f * v - row[f] * v * v;
                row[f] -= lr * (dm * grad + self.reg.factor * row[f]);
            }
        }
    }
}
