//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum EvoError {
    /// Rejected configuration, detected before any evaluation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Action probabilities that cannot be sampled from.
    #[error("Invalid action distribution: {0}")]
    InvalidDistribution(String),

    /// Observation length differs from the network input size.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Size the network was built for.
        expected: usize,
        /// Size of the given observation.
        actual: usize,
    },

    /// Network parameters that do not agree with the network configuration.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// An agent index that does not refer to a slot of the population.
    #[error("Agent index {index} out of range for a population of {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Population size.
        len: usize,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
