//! Error types shared by all search engines.

use std::error::Error;
use std::fmt;

/// A specialized result type for centroid search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by the cost evaluator, the neighborhood generator and the
/// search engines.
///
/// All variants are per-call and recoverable: the caller can retry with
/// corrected inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The dataset contains no points.
    EmptyDataset,
    /// A point or centroid has a different dimensionality than expected.
    DimensionMismatch { expected: usize, found: usize },
    /// A numeric parameter is outside its valid range.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    /// A mode string does not name a known strategy.
    UnknownMode {
        kind: &'static str,
        value: String,
    },
    /// A neighbor structure does not have one neighbor set per centroid.
    ShapeMismatch { expected: usize, found: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyDataset => write!(f, "dataset must contain at least one point"),
            SearchError::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch: expected {} coordinates, found {}",
                expected, found
            ),
            SearchError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{}`: {}", name, reason)
            }
            SearchError::UnknownMode { kind, value } => {
                write!(f, "unknown {} `{}`", kind, value)
            }
            SearchError::ShapeMismatch { expected, found } => write!(
                f,
                "neighborhood shape mismatch: expected {} neighbor sets, found {}",
                expected, found
            ),
        }
    }
}

impl Error for SearchError {}
