//! On-disk layout: `<root>/<YYYY-MM-DD>/routing/<id>.json`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use triage_types::ArtifactId;

pub const CATEGORY: &str = "routing";
pub const EXTENSION: &str = "json";

/// Directory holding one day's routing artifacts.
pub fn partition_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y-%m-%d").to_string()).join(CATEGORY)
}

pub fn artifact_path(root: &Path, id: &ArtifactId) -> PathBuf {
    partition_dir(root, id.date()).join(format!("{}.{}", id, EXTENSION))
}

/// Identifier encoded in an artifact file name, if it is one.
pub fn id_from_file_name(name: &str) -> Option<ArtifactId> {
    let stem = name.strip_suffix(EXTENSION)?.strip_suffix('.')?;
    ArtifactId::parse(stem).ok()
}
