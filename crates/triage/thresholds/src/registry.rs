//! Shared, atomically swappable threshold table.
//!
//! Readers take an `Arc` snapshot and evaluate against it without holding any
//! lock, so a concurrent reload can never expose a mix of old and new tracks.
//! A reload builds and validates the replacement completely before publishing
//! it; on failure the active set is left untouched.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::ConfigurationError;
use crate::set::ThresholdSet;

pub struct ThresholdRegistry {
    active: RwLock<Arc<ThresholdSet>>,
}

impl ThresholdRegistry {
    pub fn new(set: ThresholdSet) -> Self {
        info!(
            version = %set.version(),
            tracks = set.tracks().len(),
            "Threshold registry loaded"
        );
        Self {
            active: RwLock::new(Arc::new(set)),
        }
    }

    /// Load from a TOML file. There is no fallback: a missing or invalid file
    /// is an error and no registry is created.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let set = ThresholdSet::from_path(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Threshold load failed");
            e
        })?;
        Ok(Self::new(set))
    }

    /// Current table. Holds the read lock only long enough to clone the `Arc`.
    pub fn snapshot(&self) -> Arc<ThresholdSet> {
        Arc::clone(&self.active.read())
    }

    pub fn version(&self) -> String {
        self.active.read().version().to_string()
    }

    /// Publish a new, already validated set. Returns the set it replaced.
    pub fn reload(&self, set: ThresholdSet) -> Arc<ThresholdSet> {
        let next = Arc::new(set);
        let previous = std::mem::replace(&mut *self.active.write(), Arc::clone(&next));
        info!(
            from = %previous.version(),
            to = %next.version(),
            "Threshold registry reloaded"
        );
        previous
    }

    /// Parse and validate `path`, then publish it. On error the active set stays.
    pub fn reload_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Arc<ThresholdSet>, ConfigurationError> {
        let path = path.as_ref();
        match ThresholdSet::from_path(path) {
            Ok(set) => Ok(self.reload(set)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    active = %self.version(),
                    error = %e,
                    "Threshold reload rejected; keeping active set"
                );
                Err(e)
            }
        }
    }

    /// Same as [`reload_from_path`](Self::reload_from_path) for in-memory TOML.
    pub fn reload_from_toml_str(
        &self,
        source: &str,
    ) -> Result<Arc<ThresholdSet>, ConfigurationError> {
        match ThresholdSet::from_toml_str(source) {
            Ok(set) => Ok(self.reload(set)),
            Err(e) => {
                warn!(
                    active = %self.version(),
                    error = %e,
                    "Threshold reload rejected; keeping active set"
                );
                Err(e)
            }
        }
    }
}
