//! Error types for vector math.

use thiserror::Error;

/// Errors raised by degenerate vector input.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// A vector with (near) zero length cannot be normalized.
    #[error("vector has zero length")]
    ZeroLength,

    /// Two vectors are parallel, so their cross product has no direction.
    #[error("vectors are parallel")]
    Parallel,
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;
