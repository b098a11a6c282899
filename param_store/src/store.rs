use fm_core::FmParams;

use crate::error::Result;

/// The contract a training worker needs from the shared parameter store.
///
/// `pull` returns a worker's snapshot for an epoch: the bias, the full
/// dense weight vector and the requested factor rows. `push` applies a
/// parameter-shaped delta additively, so concurrent pushes commute. The
/// `barrier` is the version clock: it resolves once every participating
/// worker has arrived, which makes each pushed delta visible to all
/// workers before any of them pulls again.
///
/// These three calls are the only points where a training loop may
/// suspend.
#[trait_variant::make(ParamStore: Send)]
pub trait ParamStoreTemplate {
    /// Pulls the current bias, all weights and the factor rows in `rows`.
    async fn pull(&self, rows: &[usize]) -> Result<FmParams>;

    /// Applies `delta` additively to the shared parameters.
    async fn push(&self, delta: &FmParams) -> Result<()>;

    /// Waits until every participating worker has reached the barrier.
    async fn barrier(&self) -> Result<()>;
}
