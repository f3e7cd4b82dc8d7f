use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use triage_thresholds::{ThresholdRegistry, ThresholdSet};
use triage_types::{
    Clock, ComponentCounts, RoutingDecision, Selection, SystemClock, ValidationError,
};

use crate::reasons;

/// Select a track for `counts` against `set`.
///
/// Tracks are tried in priority order and the first satisfied one wins;
/// evaluation for selection stops there. Every other track then gets a reason:
/// earlier tracks list their violated bounds, later tracks list theirs or, if
/// they would also have matched, the precedence that beat them.
pub fn select(set: &ThresholdSet, counts: &ComponentCounts) -> Selection {
    let tracks = set.tracks();
    // The set always ends with the unconstrained catch-all.
    let last = tracks.len().saturating_sub(1);
    let winner_index = tracks
        .iter()
        .position(|t| {
            let satisfied = t.is_satisfied(counts);
            debug!(track = t.name(), satisfied, "Track evaluated");
            satisfied
        })
        .unwrap_or(last);
    let winner = &tracks[winner_index];

    let alternatives: BTreeMap<String, String> = tracks
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != winner_index)
        .map(|(i, track)| {
            let violations = track.violations(counts);
            let reason = if i > winner_index && violations.is_empty() {
                reasons::outranked(track, winner, counts)
            } else {
                reasons::rejection(&violations)
            };
            (track.name().to_string(), reason)
        })
        .collect();

    Selection {
        track: winner.name().to_string(),
        kind: winner.kind(),
        confidence: winner.confidence(),
        primary_reason: reasons::primary(winner, counts),
        alternatives,
        evaluation_order: tracks.iter().map(|t| t.name().to_string()).collect(),
    }
}

/// Routes units of work to handling tracks.
///
/// Stateless per call apart from reading the shared [`ThresholdRegistry`];
/// safe to share across threads. Request text is recorded for audit only and
/// never influences the selected track.
pub struct DecisionEngine {
    registry: Arc<ThresholdRegistry>,
    clock: Arc<dyn Clock>,
    salt: String,
}

impl DecisionEngine {
    /// Engine on the wall clock with a random identifier salt.
    pub fn new(registry: Arc<ThresholdRegistry>) -> Self {
        Self {
            registry,
            clock: Arc::new(SystemClock),
            salt: uuid::Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Fix the identifier salt, making ids reproducible together with a fixed clock.
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    pub fn registry(&self) -> &Arc<ThresholdRegistry> {
        &self.registry
    }

    /// Pure, clock-free track selection against the current thresholds.
    pub fn evaluate(&self, counts: &ComponentCounts) -> Selection {
        select(&self.registry.snapshot(), counts)
    }

    /// Select a track and seal the result into a [`RoutingDecision`].
    ///
    /// Never fails: the catch-all track always matches.
    pub fn route(&self, request: &str, counts: &ComponentCounts) -> RoutingDecision {
        let set = self.registry.snapshot();
        let selection = select(&set, counts);
        let decision = RoutingDecision::new(
            selection,
            *counts,
            request,
            self.clock.now(),
            &self.salt,
            set.version(),
        );

        info!(
            artifact_id = %decision.artifact_id(),
            track = decision.track(),
            confidence = %decision.confidence(),
            thresholds = set.version(),
            request_len = request.len(),
            "Request routed"
        );
        decision
    }

    /// Validate loosely-typed counts, then [`route`](Self::route).
    pub fn route_json(
        &self,
        request: &str,
        counts: &Value,
    ) -> Result<RoutingDecision, ValidationError> {
        let counts = ComponentCounts::from_json(counts).map_err(|e| {
            warn!(error = %e, "Counts rejected before routing");
            e
        })?;
        Ok(self.route(request, &counts))
    }
}
