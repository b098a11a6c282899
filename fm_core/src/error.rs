use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the factorization machine core.
pub type Result<T> = std::result::Result<T, FmErr>;

/// Failures the core can report.
///
/// Shape mismatches between collaborators that were constructed together
/// (a missing factor row, a feature id past the weight vector) are bugs,
/// not runtime conditions, and panic instead of appearing here.
#[derive(Debug, PartialEq)]
pub enum FmErr {
    /// A data source was read past the number of instances it reported.
    SourceExhausted { read: usize, size: usize },
    /// The factor initialization spread is negative or not finite.
    InvalidStdDev { std_dev: f32 },
}

impl Display for FmErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmErr::SourceExhausted { read, size } => {
                write!(f, "data source exhausted: read index {read} of {size}")
            }
            FmErr::InvalidStdDev { std_dev } => {
                write!(f, "factor std_dev must be finite and non-negative, got {std_dev}")
            }
        }
    }
}

impl Error for FmErr {}
