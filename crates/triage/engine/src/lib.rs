#![deny(unsafe_code)]
//! # triage-engine
//!
//! Ordered-rule track selection for the Triage routing engine.
//!
//! The [`DecisionEngine`] evaluates the tracks of the active threshold set in
//! fixed priority order against a unit of work's counts. The first satisfied
//! track wins; every other track receives a reason naming the concrete counts
//! that ruled it out. Request text is audit context only.
//!
//! ## Key Types
//!
//! - [`DecisionEngine`]: `evaluate`, `route` and `route_json`
//! - [`ExplanationRenderer`]: pure text rendering of a decision
//! - [`select`]: the selection algorithm against an explicit threshold set

pub mod engine;
pub mod reasons;
pub mod render;

pub use engine::{select, DecisionEngine};
pub use render::ExplanationRenderer;
