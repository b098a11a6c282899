use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{
    error::{FmErr, Result},
    table::FactorTable,
};

/// Draws one factor row per feature id in `0..num_features`, each entry
/// i.i.d. from a zero-mean normal with the given spread.
///
/// Exactly one worker, the designated initializer, performs this draw, so
/// the model starts from a single random state rather than a sum of
/// per-worker draws.
pub fn normal_factors<R: Rng>(
    rng: &mut R,
    num_features: usize,
    rank: usize,
    std_dev: f32,
) -> Result<FactorTable> {
    let normal = Normal::new(0.0, std_dev).map_err(|_| FmErr::InvalidStdDev { std_dev })?;

    let mut factors = FactorTable::new(rank);
    for feature in 0..num_features {
        let row: Array1<f32> = (0..rank).map(|_| normal.sample(rng)).collect();
        factors.insert(feature, row);
    }

    Ok(factors)
}
