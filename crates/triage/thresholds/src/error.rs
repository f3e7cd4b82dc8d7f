//! Threshold configuration errors.

use std::path::PathBuf;

use thiserror::Error;
use triage_types::TrackKind;

/// A threshold set that cannot be loaded or does not validate.
///
/// Fatal at startup. On reload the previously active set stays in place.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read thresholds from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed thresholds: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("threshold set version is empty")]
    EmptyVersion,

    #[error("no track of kind `{0}` is defined")]
    MissingTrack(TrackKind),

    #[error("more than one track of kind `{0}` is defined")]
    DuplicateTrack(TrackKind),

    #[error("track of kind `{0}` has an empty name")]
    EmptyName(TrackKind),

    #[error("track name `{0}` is used more than once")]
    DuplicateName(String),

    #[error("track `{track}` has confidence {value} outside [0, 1]")]
    InvalidConfidence { track: String, value: f64 },

    #[error("track `{track}` bounds unknown dimension `{dimension}`")]
    UnknownDimension { track: String, dimension: String },

    #[error("track `{track}` bound on `{dimension}` has min {min} > max {max}")]
    InvertedBound {
        track: String,
        dimension: String,
        min: u64,
        max: u64,
    },

    #[error("catch-all track `{0}` must not declare bounds or flags")]
    CatchAllConstrained(String),
}
