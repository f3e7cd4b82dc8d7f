#![deny(unsafe_code)]
//! # triage-audit
//!
//! Audit trail for Triage routing decisions.
//!
//! Each [`RoutingDecision`](triage_types::RoutingDecision) is written once as a
//! JSON [`Artifact`] under `<root>/<YYYY-MM-DD>/routing/<id>.json`. Artifacts
//! are never updated in place and an identifier that already exists is a
//! [`PersistenceError::Collision`]. Storage failures never affect routing: the
//! caller still holds the decision and owns any retry.
//!
//! ## Key Types
//!
//! - [`AuditTrail`]: `save`, `load` and `list` over a store
//! - [`FileAuditTrail`] / [`MemoryAuditTrail`]: filesystem and in-process stores
//! - [`Artifact`]: on-disk document; [`ArtifactOptions`] controls its metadata

pub mod artifact;
pub mod error;
pub mod layout;
pub mod store;

pub use artifact::{
    Artifact, ArtifactContext, ArtifactMetadata, ArtifactOptions, DecisionRecord, Priority,
};
pub use error::{InvalidArtifact, PersistenceError};
pub use store::{ArtifactLocation, AuditTrail, FileAuditTrail, MemoryAuditTrail};
