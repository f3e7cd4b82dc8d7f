//! Versioned, validated threshold tables.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use triage_types::{Confidence, Dimension, TrackKind};

use crate::error::ConfigurationError;
use crate::threshold::{Bound, TrackThreshold};

const STANDARD_THRESHOLDS: &str = include_str!("../thresholds.toml");

/// On-disk form, validated into a [`ThresholdSet`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdFile {
    version: String,
    #[serde(rename = "track", default)]
    tracks: Vec<TrackDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackDef {
    name: String,
    kind: TrackKind,
    confidence: f64,
    #[serde(default)]
    read_only: bool,
    #[serde(default)]
    requires_tests: bool,
    #[serde(default)]
    bounds: BTreeMap<String, Bound>,
}

impl TrackDef {
    fn into_threshold(self) -> Result<TrackThreshold, ConfigurationError> {
        let confidence =
            Confidence::new(self.confidence).map_err(|_| ConfigurationError::InvalidConfidence {
                track: self.name.clone(),
                value: self.confidence,
            })?;

        let mut threshold = TrackThreshold::new(self.name.clone(), self.kind, confidence);
        if self.read_only {
            threshold = threshold.read_only();
        }
        if self.requires_tests {
            threshold = threshold.requiring_tests();
        }
        for (field, bound) in self.bounds {
            let dimension = Dimension::from_field_name(&field).ok_or_else(|| {
                ConfigurationError::UnknownDimension {
                    track: self.name.clone(),
                    dimension: field.clone(),
                }
            })?;
            threshold = threshold.with_bound(dimension, bound);
        }
        Ok(threshold)
    }
}

/// One track per [`TrackKind`], held in priority order.
///
/// Only constructible through validation; there is no default set.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdSet {
    version: String,
    tracks: Vec<TrackThreshold>,
}

impl ThresholdSet {
    /// Validate and order a set of tracks.
    ///
    /// Requires exactly one track per kind, unique non-empty names,
    /// `min <= max` on every bound and an unconstrained catch-all.
    pub fn new(
        version: impl Into<String>,
        tracks: Vec<TrackThreshold>,
    ) -> Result<Self, ConfigurationError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(ConfigurationError::EmptyVersion);
        }

        let mut kinds = HashSet::new();
        let mut names = HashSet::new();
        for track in &tracks {
            if !kinds.insert(track.kind()) {
                return Err(ConfigurationError::DuplicateTrack(track.kind()));
            }
            if track.name().trim().is_empty() {
                return Err(ConfigurationError::EmptyName(track.kind()));
            }
            if !names.insert(track.name().to_string()) {
                return Err(ConfigurationError::DuplicateName(track.name().to_string()));
            }
            for (dimension, bound) in track.bounds() {
                if let (Some(min), Some(max)) = (bound.min, bound.max) {
                    if min > max {
                        return Err(ConfigurationError::InvertedBound {
                            track: track.name().to_string(),
                            dimension: dimension.to_string(),
                            min,
                            max,
                        });
                    }
                }
            }
            if track.kind().is_catch_all() && !track.is_unconstrained() {
                return Err(ConfigurationError::CatchAllConstrained(
                    track.name().to_string(),
                ));
            }
        }
        if let Some(missing) = TrackKind::PRIORITY.into_iter().find(|k| !kinds.contains(k)) {
            return Err(ConfigurationError::MissingTrack(missing));
        }

        let mut tracks = tracks;
        tracks.sort_by_key(|t| t.kind().priority());
        Ok(Self { version, tracks })
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigurationError> {
        let file: ThresholdFile = toml::from_str(source)?;
        let tracks = file
            .tracks
            .into_iter()
            .map(TrackDef::into_threshold)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(file.version, tracks)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The thresholds bundled with this crate (`thresholds.toml`).
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::from_toml_str(STANDARD_THRESHOLDS)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Tracks in evaluation order.
    pub fn tracks(&self) -> &[TrackThreshold] {
        &self.tracks
    }

    pub fn get(&self, kind: TrackKind) -> Option<&TrackThreshold> {
        self.tracks.iter().find(|t| t.kind() == kind)
    }

    pub fn by_name(&self, name: &str) -> Option<&TrackThreshold> {
        self.tracks.iter().find(|t| t.name() == name)
    }
}
