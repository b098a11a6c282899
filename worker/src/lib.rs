pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod shard;
pub mod worker;

pub use context::{ExecContext, LocalContext};
pub use error::{Result, WorkerErr};
pub use metrics::{LossHistory, MetricsSink};
pub use worker::FmWorker;
