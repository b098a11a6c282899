use std::{env, io};

use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::task::JoinSet;

use fm_core::{DataSource, Instance, MemorySource, SparseVector, scan_used_features};
use param_store::{MemoryStore, ParamStore};
use worker::{
    FmWorker, LocalContext, LossHistory, WorkerErr,
    config::{self, RunConfig},
    shard::shard_range,
};

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let run = match env::args().nth(1) {
        Some(path) => config::load_run_config(&path).map_err(io::Error::other)?,
        None => config::parse_run_config("{}").map_err(io::Error::other)?,
    };
    if run.fm.num_features < 2 {
        return Err(io::Error::other("num_features must be at least 2"));
    }

    info!(
        workers = run.workers.get(), instances = run.instances,
        features = run.fm.num_features, rank = run.fm.rank.get();
        "starting local training run"
    );

    let dataset = synthetic_regression(&run);
    let workers = run.workers.get();
    let store = MemoryStore::new(run.fm.num_features, run.fm.rank.get(), workers);

    let mut tasks = JoinSet::new();
    for worker_id in 0..workers {
        let mut source = dataset.slice(shard_range(dataset.size(), worker_id, workers));
        let mask = scan_used_features(&mut source, run.fm.num_features)
            .map_err(io::Error::other)?;

        let store = store.clone();
        let fm = run.fm;
        let rng = StdRng::seed_from_u64(run.seed.wrapping_add(worker_id as u64));

        tasks.spawn(async move {
            let mut fm = FmWorker::new(fm, &mask, rng);
            let ctx = LocalContext::new(worker_id);
            let mut history = LossHistory::new();
            fm.run(&store, &mut source, &ctx, &mut history).await?;
            Ok::<_, WorkerErr>((worker_id, history))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (worker_id, history) = joined.map_err(io::Error::other)??;
        info!(worker = worker_id; "final shard loss {:?}", history.last());
    }

    let rows: Vec<usize> = (0..run.fm.num_features).collect();
    let params = store.pull(&rows).await.map_err(io::Error::other)?;
    info!(
        weights = params.weights.len(), rows = params.factors.len();
        "trained model resident in store, bias {}", params.bias
    );

    Ok(())
}

/// Synthetic sparse regression data: each instance activates two features
/// and its label mixes their linear effects with one pairwise interaction,
/// something a rank > 0 model can capture and a pure linear one cannot.
fn synthetic_regression(run: &RunConfig) -> MemorySource {
    let mut rng = StdRng::seed_from_u64(run.seed);
    let n = run.fm.num_features;

    let instances = (0..run.instances)
        .map(|_| {
            let a = rng.random_range(0..n - 1);
            let b = rng.random_range(a + 1..n);
            let va = rng.random_range(0.5f32..1.5);
            let vb = rng.random_range(0.5f32..1.5);

            let label = 0.4 * va - 0.2 * vb + 0.3 * va * vb;
            Instance::new(SparseVector::new(vec![a, b], vec![va, vb]), label)
        })
        .collect();

    MemorySource::new(instances)
}
