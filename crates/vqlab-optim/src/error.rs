//! Error handling for the optimizer loop and checkpoint store.

use std::path::PathBuf;

use thiserror::Error;
use vqlab_circuit::CircuitError;

/// Result type for optimizer operations.
pub type OptimResult<T> = Result<T, OptimError>;

/// Errors that can occur while optimizing or persisting state.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OptimError {
    /// Step size is zero, negative or not finite.
    #[error("Invalid step size {0}: must be finite and greater than zero")]
    InvalidStepSize(f64),

    /// Checkpoint interval of zero.
    #[error("Checkpoint interval must be at least 1")]
    InvalidCheckpointInterval,

    /// Cost or gradient evaluation failed.
    #[error("Cost evaluation failed: {0}")]
    Circuit(#[from] CircuitError),

    /// No checkpoint file at the given path.
    #[error("Checkpoint not found: {}", .0.display())]
    CheckpointNotFound(PathBuf),

    /// Checkpoint file exists but does not hold `params` and `cost_history`.
    #[error("Malformed checkpoint {}: {message}", .path.display())]
    MalformedCheckpoint { path: PathBuf, message: String },

    /// Filesystem error while reading or writing a checkpoint.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OptimError::Io {
            path: path.into(),
            source,
        }
    }
}
