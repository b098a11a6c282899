use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use tokio::sync::Barrier;

use fm_core::{FactorTable, FmParams};

use crate::{
    error::{Result, StoreErr},
    store::ParamStore,
};

/// An in-process parameter store for single-node runs and tests.
///
/// Every factor row is materialized as zeros up front, pushes land
/// additively under one lock, and the version clock is a barrier sized to
/// the participating worker count. Cloning yields another handle to the
/// same store.
#[derive(Clone)]
pub struct MemoryStore {
    params: Arc<RwLock<FmParams>>,
    clock: Arc<Barrier>,
}

impl MemoryStore {
    /// Creates a store holding zeroed parameters.
    ///
    /// # Arguments
    /// * `num_features` - Weight vector length and number of factor rows.
    /// * `rank` - Factor row length.
    /// * `workers` - Number of workers the barrier waits for.
    pub fn new(num_features: usize, rank: usize, workers: usize) -> Self {
        Self {
            params: Arc::new(RwLock::new(FmParams::zeros(num_features, rank))),
            clock: Arc::new(Barrier::new(workers)),
        }
    }
}

impl ParamStore for MemoryStore {
    async fn pull(&self, rows: &[usize]) -> Result<FmParams> {
        let params = self.params.read();

        let mut factors = FactorTable::new(params.factors.rank());
        for &row in rows {
            let values = params
                .factors
                .get(row)
                .ok_or(StoreErr::UnknownRow { row })?;
            factors.insert(row, values.clone());
        }

        debug!(rows = rows.len(); "pulled parameter snapshot");

        Ok(FmParams::new(params.bias, params.weights.clone(), factors))
    }

    async fn push(&self, delta: &FmParams) -> Result<()> {
        let mut params = self.params.write();

        if delta.weights.len() != params.weights.len() {
            return Err(StoreErr::WeightsLenMismatch {
                got: delta.weights.len(),
                expected: params.weights.len(),
            });
        }

        // Validate every row before mutating anything, so a rejected push
        // leaves the store untouched.
        let rank = params.factors.rank();
        for (row, values) in delta.factors.iter() {
            if !params.factors.contains(row) {
                return Err(StoreErr::UnknownRow { row });
            }
            if values.len() != rank {
                return Err(StoreErr::RankMismatch {
                    row,
                    got: values.len(),
                    expected: rank,
                });
            }
        }

        params.bias += delta.bias;
        params.weights += &delta.weights;
        for (row, values) in delta.factors.iter() {
            *params.factors.row_mut(row) += values;
        }

        debug!(rows = delta.factors.len(); "applied pushed delta");

        Ok(())
    }

    async fn barrier(&self) -> Result<()> {
        self.clock.wait().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;

    use super::*;

    #[tokio::test]
    async fn push_then_pull_round_trips() {
        let store = MemoryStore::new(2, 1, 1);

        let mut delta = FmParams::zeros(2, 1);
        delta.bias = 0.25;
        delta.weights[0] = 0.5;
        delta.factors.row_mut(1)[0] = 1.5;

        store.push(&delta).await.unwrap();
        let pulled = store.pull(&[0, 1]).await.unwrap();

        assert_eq!(pulled.bias, 0.25);
        assert_eq!(pulled.weights[0], 0.5);
        assert_eq!(pulled.weights[1], 0.0);
        assert_eq!(pulled.factors.row(0)[0], 0.0);
        assert_eq!(pulled.factors.row(1)[0], 1.5);
    }

    #[tokio::test]
    async fn pull_returns_only_the_requested_rows() {
        let store = MemoryStore::new(3, 2, 1);
        let pulled = store.pull(&[2]).await.unwrap();

        assert_eq!(pulled.weights.len(), 3);
        assert_eq!(pulled.factors.len(), 1);
        assert!(pulled.factors.contains(2));
    }

    #[tokio::test]
    async fn pushes_accumulate() {
        let store = MemoryStore::new(1, 1, 1);
        let mut delta = FmParams::zeros(1, 1);
        delta.bias = 1.0;
        delta.weights[0] = 2.0;

        store.push(&delta).await.unwrap();
        store.push(&delta).await.unwrap();

        let pulled = store.pull(&[0]).await.unwrap();
        assert_eq!(pulled.bias, 2.0);
        assert_eq!(pulled.weights[0], 4.0);
    }

    #[tokio::test]
    async fn pull_rejects_unknown_rows() {
        let store = MemoryStore::new(2, 1, 1);
        let err = store.pull(&[5]).await.unwrap_err();
        assert_eq!(err, StoreErr::UnknownRow { row: 5 });
    }

    #[tokio::test]
    async fn push_rejects_mismatched_weights() {
        let store = MemoryStore::new(2, 2, 1);
        let err = store.push(&FmParams::zeros(3, 2)).await.unwrap_err();
        assert_eq!(
            err,
            StoreErr::WeightsLenMismatch {
                got: 3,
                expected: 2
            }
        );
    }

    #[tokio::test]
    async fn push_rejects_mismatched_rank() {
        let store = MemoryStore::new(2, 2, 1);

        let mut factors = FactorTable::new(1);
        factors.insert(0, Array1::zeros(1));
        let delta = FmParams::with_factors(2, factors);

        let err = store.push(&delta).await.unwrap_err();
        assert_eq!(
            err,
            StoreErr::RankMismatch {
                row: 0,
                got: 1,
                expected: 2
            }
        );
    }

    #[tokio::test]
    async fn push_rejects_unknown_rows_without_applying_anything() {
        let store = MemoryStore::new(2, 1, 1);

        let mut delta = FmParams::zeros(2, 1);
        delta.weights[0] = 3.0;
        let row = delta.factors.row(0).clone();
        delta.factors.insert(9, row);

        let err = store.push(&delta).await.unwrap_err();
        assert_eq!(err, StoreErr::UnknownRow { row: 9 });

        let pulled = store.pull(&[0]).await.unwrap();
        assert_eq!(pulled.weights[0], 0.0);
    }

    #[tokio::test]
    async fn barrier_releases_all_participants() {
        let store = MemoryStore::new(1, 1, 2);
        let peer = store.clone();

        let (a, b) = tokio::join!(store.barrier(), peer.barrier());
        a.unwrap();
        b.unwrap();
    }
}
