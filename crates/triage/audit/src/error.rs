//! Audit trail errors.

use std::path::PathBuf;

use thiserror::Error;
use triage_types::ArtifactId;

/// An artifact that could not be written or read back.
///
/// Saving borrows the decision, so it remains available to the caller for a
/// retry or a fallback channel when this is returned.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {id} already exists at {}; refusing to overwrite", path.display())]
    Collision { id: ArtifactId, path: PathBuf },

    #[error("failed to serialize artifact {id}: {source}")]
    Serialization {
        id: ArtifactId,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {id} not found")]
    NotFound { id: ArtifactId },

    #[error("corrupt artifact at {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// An artifact whose fields contradict each other.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("artifact {id} is inconsistent: {reason}")]
pub struct InvalidArtifact {
    pub id: ArtifactId,
    pub reason: String,
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
