//! Error types for fold analysis.

use foldmesh_topo::TopoError;
use thiserror::Error;

/// Errors from [`analyze_folds`](crate::analyze_folds).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FoldError {
    /// Settings are out of range.
    #[error("invalid fold settings: {0}")]
    InvalidSettings(String),

    /// Topology query failed.
    #[error("topology error: {0}")]
    Topo(#[from] TopoError),
}

/// Result type for fold analysis.
pub type Result<T> = std::result::Result<T, FoldError>;
