use std::fmt;

/// Errors returned by [`NearTree`](crate::NearTree) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A construction or query argument is out of its domain
    /// (zero dimension, zero `k`, negative or NaN radius).
    InvalidArgument(&'static str),
    /// A point does not have as many coordinates as the tree's dimension.
    DimensionMismatch { expected: usize, actual: usize },
    /// The tree is empty or no stored point satisfies the radius bound.
    NotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            Self::NotFound => write!(f, "no point found"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
