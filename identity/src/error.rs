use std::path::PathBuf;

use facereid_vecstore::VecError;
use thiserror::Error;

/// Errors returned by identity resolution.
#[derive(Debug, Error)]
pub enum FaceIdError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("cannot normalize a zero-norm vector")]
    ZeroVector,

    #[error("embedding component {index} is not finite")]
    NonFinite { index: usize },

    #[error("store inconsistent: index holds {index} vectors, label list holds {labels}")]
    CountMismatch { index: usize, labels: usize },

    #[error("corrupt artifact {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("detection failed: {0}")]
    Detection(String),

    #[error("frame source: {0}")]
    Source(String),

    #[error("transport: {0}")]
    Transport(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Index(#[from] VecError),
}

impl FaceIdError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
