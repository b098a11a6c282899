use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type for parameter store operations.
pub type Result<T> = std::result::Result<T, StoreErr>;

/// Failures surfaced by a parameter store.
///
/// Any of these is fatal to the training loop that hits it. Retry policy
/// belongs to whatever orchestrates the workers, not to this layer.
#[derive(Debug, PartialEq)]
pub enum StoreErr {
    /// A pull or push referenced a factor row the store does not hold.
    UnknownRow { row: usize },
    /// A pushed weights delta does not match the stored vector's length.
    WeightsLenMismatch { got: usize, expected: usize },
    /// A pushed factor row does not match the store's rank.
    RankMismatch {
        row: usize,
        got: usize,
        expected: usize,
    },
}

impl Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErr::UnknownRow { row } => {
                write!(f, "store holds no factor row {row}")
            }
            StoreErr::WeightsLenMismatch { got, expected } => {
                write!(f, "weights delta has length {got}, store holds {expected}")
            }
            StoreErr::RankMismatch { row, got, expected } => {
                write!(f, "factor row {row} has length {got}, store rank is {expected}")
            }
        }
    }
}

impl Error for StoreErr {}
