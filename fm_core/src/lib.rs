mod config;
mod data;
mod error;
mod evaluate;
mod init;
mod loss;
mod model;
mod sgd;
mod sparse;
mod table;

pub use config::FmConfig;
pub use data::{DataSource, Instance, MemorySource, scan_used_features};
pub use error::{FmErr, Result};
pub use evaluate::sum_squared_error;
pub use init::normal_factors;
pub use loss::LearningMode;
pub use model::{Clip, FmParams};
pub use sgd::{FmSgd, Regularization};
pub use sparse::SparseVector;
pub use table::FactorTable;
