use ndarray::Array1;

use crate::{sparse::SparseVector, table::FactorTable};

/// Prediction clip bounds.
///
/// Fixed for a model's lifetime and applied identically while training and
/// while evaluating, so both see the same prediction function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    min: f32,
    max: f32,
}

impl Clip {
    /// # Panics
    /// If `min > max`.
    pub fn new(min: f32, max: f32) -> Self {
        assert!(min <= max, "clip min must not exceed max");
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamps `score` into `[min, max]`.
    #[inline]
    pub fn apply(&self, score: f32) -> f32 {
        score.clamp(self.min, self.max)
    }
}

/// One full set of factorization machine parameters: global bias, dense
/// linear weights and the pairwise factor rows.
///
/// The same shape doubles as the additive delta exchanged with a parameter
/// store, with factor rows present only for touched features.
#[derive(Debug, Clone, PartialEq)]
pub struct FmParams {
    pub bias: f32,
    pub weights: Array1<f32>,
    pub factors: FactorTable,
}

impl FmParams {
    pub fn new(bias: f32, weights: Array1<f32>, factors: FactorTable) -> Self {
        Self {
            bias,
            weights,
            factors,
        }
    }

    /// All-zero parameters with every factor row materialized.
    pub fn zeros(num_features: usize, rank: usize) -> Self {
        let mut factors = FactorTable::new(rank);
        for feature in 0..num_features {
            factors.insert(feature, Array1::zeros(rank));
        }
        Self {
            bias: 0.0,
            weights: Array1::zeros(num_features),
            factors,
        }
    }

    /// Zero bias and weights around an already-drawn factor table.
    pub fn with_factors(num_features: usize, factors: FactorTable) -> Self {
        Self {
            bias: 0.0,
            weights: Array1::zeros(num_features),
            factors,
        }
    }

    /// Unclipped score for one instance.
    ///
    /// The pairwise term uses the factored identity
    /// `0.5 * sum_f ((sum_i x_i v_if)^2 - sum_i (x_i v_if)^2)`,
    /// which costs `O(rank * nnz)` instead of `O(rank * nnz^2)` and is
    /// exactly zero when fewer than two features are active.
    ///
    /// # Panics
    /// If a feature in `x` has no materialized factor row.
    pub fn raw_score(&self, x: &SparseVector) -> f32 {
        let mut score = self.bias + x.dot(&self.weights);

        for f in 0..self.factors.rank() {
            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            for (j, v) in x.iter() {
                let t = v * self.factors.row(j)[f];
                sum += t;
                sum_sq += t * t;
            }
            score += 0.5 * (sum * sum - sum_sq);
        }

        score
    }

    /// Clipped score for one instance, the model's actual prediction.
    ///
    /// # Panics
    /// Same contract as [`raw_score`](Self::raw_score).
    #[inline]
    pub fn predict(&self, x: &SparseVector, clip: Clip) -> f32 {
        clip.apply(self.raw_score(x))
    }

    /// Net update `self - base`, component-wise.
    ///
    /// Factor rows whose difference is zero everywhere are omitted: they
    /// carry no additive information, and rows never touched by training
    /// always fall in this class.
    ///
    /// # Panics
    /// If the weight vectors differ in length or `base` is missing a row
    /// that `self` holds.
    pub fn delta_from(&self, base: &FmParams) -> FmParams {
        assert_eq!(
            self.weights.len(),
            base.weights.len(),
            "weight vectors must have same length"
        );

        let mut factors = FactorTable::new(self.factors.rank());
        for (feature, row) in self.factors.iter() {
            let diff = row - base.factors.row(feature);
            if diff.iter().any(|&d| d != 0.0) {
                factors.insert(feature, diff);
            }
        }

        FmParams {
            bias: self.bias - base.bias,
            weights: &self.weights - &base.weights,
            factors,
        }
    }
}
