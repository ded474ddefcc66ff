//! Error types for curve and frame construction.

use foldmesh_math::MathError;
use thiserror::Error;

/// Errors that can occur while fitting geometry to points.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeomError {
    /// Two of the input points coincide.
    #[error("input points coincide")]
    CoincidentPoints,

    /// The input points lie on one line, so no circle passes through them.
    #[error("input points are collinear")]
    CollinearPoints,

    /// Degenerate vector input.
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
