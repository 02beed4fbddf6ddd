//! Error types.

use thiserror::Error;

/// Errors raised before the optimization loop starts.
///
/// The loop itself never fails: an infeasible scenario produces a normal
/// result whose hard penalty is non-zero.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A [`PsoConfig`](crate::pso::PsoConfig) parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A [`Scenario`](crate::fitness::Scenario) field is out of range.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// A coordinate vector does not have the expected length.
    #[error("dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch {
        /// Required number of coordinates.
        expected: usize,
        /// Number of coordinates supplied.
        found: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
