//! Error types for grail-vector.

use thiserror::Error;

/// Result type for grail-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grail-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Build was called with zero vectors. An empty index cannot answer
    /// queries meaningfully.
    #[error("Cannot build an index from zero vectors")]
    EmptyIndex,

    /// Dimension mismatch between a vector and the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., zero-dimensional, contains NaN or Inf).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),
}
