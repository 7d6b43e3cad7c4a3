//! Benchmark setup error type.

use crate::source::SyntheticError;
use dendra_core::LinkageError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic point generation failed.
    #[error("synthetic point generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Building or walking a linkage table failed.
    #[error("linkage operation failed: {0}")]
    Linkage(#[from] LinkageError),
}
