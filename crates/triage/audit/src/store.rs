//! Audit trail stores.
//!
//! Every save creates a new artifact; nothing is ever overwritten. An id that
//! already exists is reported as a collision, since it means two decisions
//! hashed to the same identifier. File artifacts are staged under a dot-prefixed
//! temporary name in their partition and published with a no-clobber rename.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use triage_types::{ArtifactId, RoutingDecision};

use crate::artifact::{Artifact, ArtifactOptions};
use crate::error::PersistenceError;
use crate::layout;

/// Where a saved artifact ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub id: ArtifactId,
    /// Absolute for file stores; relative to the trail root for in-memory ones.
    pub path: PathBuf,
}

/// Append-only store of routing artifacts.
pub trait AuditTrail: Send + Sync {
    /// Persist `decision` exactly once.
    fn save(&self, decision: &RoutingDecision) -> Result<ArtifactLocation, PersistenceError>;

    fn load(&self, id: &ArtifactId) -> Result<Artifact, PersistenceError>;

    /// Identifiers saved under `date`, sorted.
    fn list(&self, date: NaiveDate) -> Result<Vec<ArtifactId>, PersistenceError>;
}

/// Filesystem audit trail rooted at a caller-supplied directory.
pub struct FileAuditTrail {
    root: PathBuf,
    options: ArtifactOptions,
}

impl FileAuditTrail {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: ArtifactOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ArtifactOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ArtifactOptions {
        &self.options
    }

    /// Stage `bytes` in a temporary file beside `path`, then publish it there
    /// unless something already holds that name. Readers only ever see
    /// complete artifacts.
    fn write_new(
        &self,
        id: &ArtifactId,
        path: &Path,
        bytes: &[u8],
    ) -> Result<(), PersistenceError> {
        let dir = path.parent().unwrap_or(&self.root);
        let mut staged = tempfile::Builder::new()
            .prefix(&format!(".{}.", id))
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(PersistenceError::io(dir))?;

        // The staged file is removed when dropped on any error below.
        staged
            .write_all(bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(PersistenceError::io(staged.path()))?;

        match staged.persist_noclobber(path) {
            Ok(_) => Ok(()),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                Err(PersistenceError::Collision {
                    id: id.clone(),
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source: e.error,
            }),
        }
    }
}

impl AuditTrail for FileAuditTrail {
    fn save(&self, decision: &RoutingDecision) -> Result<ArtifactLocation, PersistenceError> {
        let id = decision.artifact_id();
        let artifact = Artifact::from_decision(decision, &self.options);
        let bytes = serde_json::to_vec_pretty(&artifact).map_err(|source| {
            PersistenceError::Serialization {
                id: id.clone(),
                source,
            }
        })?;

        let dir = layout::partition_dir(&self.root, id.date());
        // Idempotent; concurrent savers may race to create the same partition.
        fs::create_dir_all(&dir).map_err(PersistenceError::io(&dir))?;

        let path = layout::artifact_path(&self.root, id);
        if let Err(e) = self.write_new(id, &path, &bytes) {
            warn!(artifact_id = %id, error = %e, "Artifact save failed");
            return Err(e);
        }

        info!(artifact_id = %id, path = %path.display(), "Artifact saved");
        Ok(ArtifactLocation {
            id: id.clone(),
            path,
        })
    }

    fn load(&self, id: &ArtifactId) -> Result<Artifact, PersistenceError> {
        let path = layout::artifact_path(&self.root, id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound { id: id.clone() });
            }
            Err(e) => return Err(PersistenceError::io(&path)(e)),
        };

        let artifact: Artifact =
            serde_json::from_str(&contents).map_err(|e| PersistenceError::Corrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        if artifact.id != *id {
            return Err(PersistenceError::Corrupt {
                path,
                reason: format!("file records id {}", artifact.id),
            });
        }
        Ok(artifact)
    }

    fn list(&self, date: NaiveDate) -> Result<Vec<ArtifactId>, PersistenceError> {
        let dir = layout::partition_dir(&self.root, date);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&dir)(e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(PersistenceError::io(&dir))?;
            let name = entry.file_name();
            match name.to_str().and_then(layout::id_from_file_name) {
                Some(id) if id.date() == date => ids.push(id),
                _ => debug!(file = ?name, "Skipping non-artifact file"),
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// In-process audit trail with the same collision semantics as [`FileAuditTrail`].
#[derive(Default)]
pub struct MemoryAuditTrail {
    artifacts: RwLock<BTreeMap<ArtifactId, Artifact>>,
    options: ArtifactOptions,
}

impl MemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ArtifactOptions) -> Self {
        self.options = options;
        self
    }

    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.read().is_empty()
    }

    /// All artifacts in id order.
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts.read().values().cloned().collect()
    }
}

impl AuditTrail for MemoryAuditTrail {
    fn save(&self, decision: &RoutingDecision) -> Result<ArtifactLocation, PersistenceError> {
        let id = decision.artifact_id();
        let path = layout::artifact_path(Path::new(""), id);

        let mut artifacts = self.artifacts.write();
        if artifacts.contains_key(id) {
            warn!(artifact_id = %id, "Artifact id collision");
            return Err(PersistenceError::Collision {
                id: id.clone(),
                path,
            });
        }
        artifacts.insert(id.clone(), Artifact::from_decision(decision, &self.options));
        debug!(artifact_id = %id, "Artifact recorded in memory");

        Ok(ArtifactLocation {
            id: id.clone(),
            path,
        })
    }

    fn load(&self, id: &ArtifactId) -> Result<Artifact, PersistenceError> {
        self.artifacts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound { id: id.clone() })
    }

    fn list(&self, date: NaiveDate) -> Result<Vec<ArtifactId>, PersistenceError> {
        Ok(self
            .artifacts
            .read()
            .keys()
            .filter(|id| id.date() == date)
            .cloned()
            .collect())
    }
}
