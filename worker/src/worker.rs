use log::{debug, info};
use rand::Rng;

use fm_core::{DataSource, FmConfig, FmParams, FmSgd, normal_factors, sum_squared_error};
use param_store::ParamStore;

use crate::{context::ExecContext, error::Result, metrics::MetricsSink};

/// One training worker: pulls its parameter rows, trains a local replica
/// for an epoch, pushes the net delta back and crosses the version
/// barrier.
pub struct FmWorker<R: Rng> {
    config: FmConfig,
    sgd: FmSgd,
    active_rows: Vec<usize>,
    rng: R,
}

impl<R: Rng> FmWorker<R> {
    /// Creates a worker.
    ///
    /// The active row set is derived here once, from the used-feature
    /// indicator, and never changes afterwards. Every feature this
    /// worker's shard can reference must be marked, or training panics on
    /// the first instance that reaches an absent row.
    ///
    /// # Arguments
    /// * `config` - Hyperparameters for the run.
    /// * `used_features` - Per-feature indicator, true iff the shard references it.
    /// * `rng` - Randomness for factor initialization; only the designated
    ///   initializer draws from it.
    pub fn new(config: FmConfig, used_features: &[bool], rng: R) -> Self {
        let active_rows = used_features
            .iter()
            .enumerate()
            .filter_map(|(feature, &used)| used.then_some(feature))
            .collect();

        Self {
            sgd: config.updater(),
            config,
            active_rows,
            rng,
        }
    }

    /// Feature ids this worker synchronizes with the store.
    #[inline]
    pub fn active_rows(&self) -> &[usize] {
        &self.active_rows
    }

    /// Runs one training epoch against the shared store.
    ///
    /// Pulls the authoritative snapshot, deep-copies it into a local
    /// replica, applies one sequential pass of updates over `source`,
    /// pushes the net `local - snapshot` delta and crosses the version
    /// barrier. The trained replica is handed back so evaluation can reuse
    /// it without another pull.
    pub async fn run_epoch<S, D>(&self, store: &S, source: &mut D) -> Result<FmParams>
    where
        S: ParamStore,
        D: DataSource,
    {
        let snapshot = store.pull(&self.active_rows).await?;
        let mut local = snapshot.clone();

        source.reset();
        for _ in 0..source.size() {
            let instance = source.read()?;
            self.sgd.step(&mut local, &instance.features, instance.label);
        }

        let delta = local.delta_from(&snapshot);
        store.push(&delta).await?;

        debug!(pushed_rows = delta.factors.len(); "pushed epoch delta");

        store.barrier().await?;
        Ok(local)
    }

    /// Runs the full training loop: initialization, then one
    /// train-then-evaluate round per epoch until the context's counter
    /// reaches the epoch budget.
    ///
    /// Once this returns, the trained model is the store-resident state;
    /// the last epoch's local replica was only used for its evaluation.
    ///
    /// # Errors
    /// Any store or data source failure aborts the loop immediately.
    /// Deltas pushed by completed epochs stay in the store.
    pub async fn run<S, D, C, M>(
        &mut self,
        store: &S,
        source: &mut D,
        ctx: &C,
        metrics: &mut M,
    ) -> Result<()>
    where
        S: ParamStore,
        D: DataSource,
        C: ExecContext,
        M: MetricsSink,
    {
        let rank = self.config.rank.get();

        if ctx.is_initializer() {
            let factors = normal_factors(
                &mut self.rng,
                self.config.num_features,
                rank,
                self.config.init_std_dev,
            )?;
            store.push(&FmParams::with_factors(self.config.num_features, factors))
                .await?;

            info!(
                features = self.config.num_features, rank = rank;
                "initialized factor rows"
            );
        }

        store.barrier().await?;

        while ctx.iteration() < self.config.epochs.get() {
            let epoch = ctx.iteration();
            let trained = self.run_epoch(store, source).await?;

            let loss = sum_squared_error(&trained, self.sgd.clip, source)?;
            info!(worker = ctx.task_index(), epoch = epoch, loss = loss; "epoch finished");
            metrics.record_loss(epoch, loss);

            ctx.inc_iteration();
        }

        debug!(worker = ctx.task_index(); "epoch budget exhausted");
        Ok(())
    }
}
