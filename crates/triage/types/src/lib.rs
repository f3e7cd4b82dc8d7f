#![deny(unsafe_code)]
//! # triage-types
//!
//! Core value types for the Triage routing engine.
//!
//! Routing is driven by numbers only: a [`ComponentCounts`] describes the scope
//! of a unit of work, the engine selects one handling track, and the result is
//! sealed into an immutable [`RoutingDecision`] carrying a content-derived
//! [`ArtifactId`].
//!
//! ## Key Types
//!
//! - [`ComponentCounts`]: the 12 scope dimensions plus derived aggregates
//! - [`Dimension`]: names a single count, stored or derived
//! - [`TrackKind`]: the five handling tracks in fixed priority order
//! - [`Confidence`]: per-track constant in `[0, 1]`
//! - [`Selection`] / [`RoutingDecision`]: evaluation result before/after stamping
//! - [`Clock`]: injectable time source ([`SystemClock`], [`FixedClock`], [`SteppingClock`])

pub mod clock;
pub mod confidence;
pub mod counts;
pub mod decision;
pub mod error;
pub mod id;
pub mod track;

pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use confidence::Confidence;
pub use counts::{ComponentCounts, Dimension};
pub use decision::{RoutingDecision, Selection};
pub use error::{InvalidArtifactId, InvalidConfidence, ValidationError};
pub use id::ArtifactId;
pub use track::TrackKind;
