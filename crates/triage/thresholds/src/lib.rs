#![deny(unsafe_code)]
//! # triage-thresholds
//!
//! Threshold registry for the Triage routing engine.
//!
//! Each handling track is a [`TrackThreshold`]: inclusive [`Bound`]s on count
//! dimensions plus the `read_only` and `requires_tests` flags. A
//! [`ThresholdSet`] holds exactly one track per kind in priority order and is
//! only obtainable through validation, normally from TOML. The
//! [`ThresholdRegistry`] publishes a set for concurrent readers and swaps it
//! atomically on reload.

pub mod error;
pub mod registry;
pub mod set;
pub mod threshold;

pub use error::ConfigurationError;
pub use registry::ThresholdRegistry;
pub use set::ThresholdSet;
pub use threshold::{Bound, TrackThreshold, Violation};
