use std::{error::Error, fmt, io};

use fm_core::FmErr;
use param_store::StoreErr;

/// The worker crate's result type.
pub type Result<T> = std::result::Result<T, WorkerErr>;

/// Training loop failures.
///
/// All of them abort the loop immediately. Deltas already pushed by
/// completed epochs stay in the shared store; the in-flight local replica
/// is dropped.
#[derive(Debug)]
pub enum WorkerErr {
    Model(FmErr),
    Store(StoreErr),
}

impl fmt::Display for WorkerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerErr::Model(e) => write!(f, "model error: {e}"),
            WorkerErr::Store(e) => write!(f, "parameter store error: {e}"),
        }
    }
}

impl Error for WorkerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkerErr::Model(e) => Some(e),
            WorkerErr::Store(e) => Some(e),
        }
    }
}

impl From<FmErr> for WorkerErr {
    fn from(value: FmErr) -> Self {
        Self::Model(value)
    }
}

impl From<StoreErr> for WorkerErr {
    fn from(value: StoreErr) -> Self {
        Self::Store(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<WorkerErr> for io::Error {
    fn from(value: WorkerErr) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, value)
    }
}
