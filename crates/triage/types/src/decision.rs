//! Routing results.
//!
//! [`Selection`] is the pure output of evaluating thresholds against counts.
//! [`RoutingDecision`] seals a selection with its request text, timestamp and
//! artifact identifier. Decisions expose no mutators; a superseding decision is
//! a new value with a new identifier.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::confidence::Confidence;
use crate::counts::ComponentCounts;
use crate::id::ArtifactId;
use crate::track::TrackKind;

/// The winning track and the reasons every other track lost.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Name of the winning track.
    pub track: String,
    pub kind: TrackKind,
    pub confidence: Confidence,
    /// Positively stated reason the winner matched.
    pub primary_reason: String,
    /// Every non-selected track name mapped to its specific rejection reason.
    pub alternatives: BTreeMap<String, String>,
    /// All track names in the order they were evaluated, winner included.
    pub evaluation_order: Vec<String>,
}

impl Selection {
    /// Alternatives in evaluation order. Names missing from
    /// `evaluation_order` follow in name order.
    pub fn ordered_alternatives(&self) -> Vec<(&str, &str)> {
        let mut ordered: Vec<(&str, &str)> = self
            .evaluation_order
            .iter()
            .filter_map(|name| self.alternatives.get_key_value(name.as_str()))
            .map(|(name, reason)| (name.as_str(), reason.as_str()))
            .collect();
        ordered.extend(
            self.alternatives
                .iter()
                .filter(|(name, _)| !self.evaluation_order.contains(name))
                .map(|(name, reason)| (name.as_str(), reason.as_str())),
        );
        ordered
    }
}

/// An immutable, identified routing decision.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutingDecision {
    artifact_id: ArtifactId,
    timestamp: DateTime<Utc>,
    request: String,
    selection: Selection,
    counts: ComponentCounts,
    thresholds_version: String,
}

impl RoutingDecision {
    /// Seal a selection, deriving the artifact id from timestamp, track,
    /// primary reason and `salt`.
    pub fn new(
        selection: Selection,
        counts: ComponentCounts,
        request: impl Into<String>,
        timestamp: DateTime<Utc>,
        salt: &str,
        thresholds_version: impl Into<String>,
    ) -> Self {
        let artifact_id =
            ArtifactId::derive(&timestamp, &selection.track, &selection.primary_reason, salt);
        Self {
            artifact_id,
            timestamp,
            request: request.into(),
            selection,
            counts,
            thresholds_version: thresholds_version.into(),
        }
    }

    /// Rebuild a decision from its persisted parts, keeping the stored id.
    pub fn restore(
        artifact_id: ArtifactId,
        timestamp: DateTime<Utc>,
        request: impl Into<String>,
        selection: Selection,
        counts: ComponentCounts,
        thresholds_version: impl Into<String>,
    ) -> Self {
        Self {
            artifact_id,
            timestamp,
            request: request.into(),
            selection,
            counts,
            thresholds_version: thresholds_version.into(),
        }
    }

    pub fn artifact_id(&self) -> &ArtifactId {
        &self.artifact_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Free-text request; audit context only, never a routing input.
    pub fn request(&self) -> &str {
        &self.request
    }

    pub fn track(&self) -> &str {
        &self.selection.track
    }

    pub fn kind(&self) -> TrackKind {
        self.selection.kind
    }

    pub fn confidence(&self) -> Confidence {
        self.selection.confidence
    }

    pub fn primary_reason(&self) -> &str {
        &self.selection.primary_reason
    }

    pub fn alternatives(&self) -> &BTreeMap<String, String> {
        &self.selection.alternatives
    }

    pub fn evaluation_order(&self) -> &[String] {
        &self.selection.evaluation_order
    }

    /// Alternatives in the order their tracks were evaluated.
    pub fn ordered_alternatives(&self) -> Vec<(&str, &str)> {
        self.selection.ordered_alternatives()
    }

    pub fn counts(&self) -> &ComponentCounts {
        &self.counts
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Version of the threshold set that produced this decision.
    pub fn thresholds_version(&self) -> &str {
        &self.thresholds_version
    }
}
