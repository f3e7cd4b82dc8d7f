//! The persisted form of a routing decision.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use triage_types::{
    ArtifactId, ComponentCounts, Confidence, RoutingDecision, Selection, TrackKind,
};

use crate::error::InvalidArtifact;

pub const ARTIFACT_VERSION: &str = "1.0.0";
pub const ARTIFACT_TYPE: &str = "routing";
pub const DECISION_TYPE: &str = "command_selection";
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Retention priority hint for downstream tooling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

/// How artifacts are stamped when a decision is saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactOptions {
    pub priority: Priority,
    pub retention_days: u32,
    pub compression_safe: bool,
    pub framework_version: String,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        Self {
            priority: Priority::Normal,
            retention_days: DEFAULT_RETENTION_DAYS,
            compression_safe: true,
            framework_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ArtifactOptions {
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    pub fn with_compression_safe(mut self, compression_safe: bool) -> Self {
        self.compression_safe = compression_safe;
        self
    }

    pub fn with_framework_version(mut self, version: impl Into<String>) -> Self {
        self.framework_version = version.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub priority: Priority,
    pub preserve_until: NaiveDate,
    pub compression_safe: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtifactContext {
    pub user_request: String,
    pub framework_version: String,
    pub thresholds_version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub counts: ComponentCounts,
    pub chosen_command: String,
    pub track_kind: TrackKind,
    pub confidence: Confidence,
    pub primary_reason: String,
    pub alternatives: BTreeMap<String, String>,
    /// Track names in evaluation order. Absent in older artifacts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evaluation_order: Vec<String>,
}

/// One routing decision as written to the audit trail.
///
/// Written once and never updated; a superseding decision is a new artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub version: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: ArtifactMetadata,
    pub context: ArtifactContext,
    pub decision: DecisionRecord,
}

impl Artifact {
    pub fn from_decision(decision: &RoutingDecision, options: &ArtifactOptions) -> Self {
        let date = decision.timestamp().date_naive();
        let preserve_until = date
            .checked_add_days(Days::new(options.retention_days.into()))
            .unwrap_or(NaiveDate::MAX);

        Self {
            id: decision.artifact_id().clone(),
            version: ARTIFACT_VERSION.to_string(),
            artifact_type: ARTIFACT_TYPE.to_string(),
            timestamp: decision.timestamp(),
            metadata: ArtifactMetadata {
                priority: options.priority,
                preserve_until,
                compression_safe: options.compression_safe,
            },
            context: ArtifactContext {
                user_request: decision.request().to_string(),
                framework_version: options.framework_version.clone(),
                thresholds_version: decision.thresholds_version().to_string(),
            },
            decision: DecisionRecord {
                record_type: DECISION_TYPE.to_string(),
                counts: *decision.counts(),
                chosen_command: decision.track().to_string(),
                track_kind: decision.kind(),
                confidence: decision.confidence(),
                primary_reason: decision.primary_reason().to_string(),
                alternatives: decision.alternatives().clone(),
                evaluation_order: decision.evaluation_order().to_vec(),
            },
        }
    }

    /// Rebuild the decision this artifact records.
    ///
    /// Counts were re-validated when the artifact was deserialized; this checks
    /// the constant type tags and that the id's date prefix matches the timestamp.
    pub fn to_decision(&self) -> Result<RoutingDecision, InvalidArtifact> {
        let invalid = |reason: String| InvalidArtifact {
            id: self.id.clone(),
            reason,
        };
        if self.artifact_type != ARTIFACT_TYPE {
            return Err(invalid(format!(
                "type is `{}`, expected `{}`",
                self.artifact_type, ARTIFACT_TYPE
            )));
        }
        if self.decision.record_type != DECISION_TYPE {
            return Err(invalid(format!(
                "decision type is `{}`, expected `{}`",
                self.decision.record_type, DECISION_TYPE
            )));
        }
        let date = self.timestamp.date_naive();
        if self.id.date() != date {
            return Err(invalid(format!(
                "id is dated {}, timestamp is {}",
                self.id.date(),
                date
            )));
        }

        let selection = Selection {
            track: self.decision.chosen_command.clone(),
            kind: self.decision.track_kind,
            confidence: self.decision.confidence,
            primary_reason: self.decision.primary_reason.clone(),
            alternatives: self.decision.alternatives.clone(),
            evaluation_order: self.decision.evaluation_order.clone(),
        };
        Ok(RoutingDecision::restore(
            self.id.clone(),
            self.timestamp,
            self.context.user_request.clone(),
            selection,
            self.decision.counts,
            self.context.thresholds_version.clone(),
        ))
    }
}
