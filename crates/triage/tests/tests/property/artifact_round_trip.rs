//! Property tests: artifacts reproduce the decision they record.

use chrono::Duration;
use proptest::prelude::*;
use triage_audit::{Artifact, ArtifactOptions, AuditTrail, MemoryAuditTrail};
use triage_engine::DecisionEngine;
use triage_tests::{epoch, standard_registry};
use triage_types::FixedClock;

use super::strategies::{arb_counts, arb_request};

proptest! {
    /// JSON text -> Artifact -> RoutingDecision is lossless.
    #[test]
    fn json_round_trip_is_lossless(
        counts in arb_counts(),
        request in arb_request(),
        offset_nanos in 0i64..86_399_999_999_999,
    ) {
        let engine = DecisionEngine::new(standard_registry())
            .with_clock(FixedClock::new(
                epoch() - Duration::hours(9) + Duration::nanoseconds(offset_nanos),
            ));
        let decision = engine.route(&request, &counts);

        let artifact = Artifact::from_decision(&decision, &ArtifactOptions::default());
        let text = serde_json::to_string(&artifact).unwrap();
        let back: Artifact = serde_json::from_str(&text).unwrap();
        let restored = back.to_decision().unwrap();

        prop_assert_eq!(restored.counts(), decision.counts());
        prop_assert_eq!(restored.track(), decision.track());
        prop_assert_eq!(restored.confidence(), decision.confidence());
        prop_assert_eq!(restored.alternatives(), decision.alternatives());
        prop_assert_eq!(restored.timestamp(), decision.timestamp());
        prop_assert_eq!(restored, decision);
    }

    /// The in-memory trail hands back what was saved.
    #[test]
    fn memory_trail_round_trip(counts in arb_counts(), request in arb_request()) {
        let trail = MemoryAuditTrail::new();
        let decision = triage_tests::fixed_engine().route(&request, &counts);

        let location = trail.save(&decision).unwrap();
        let loaded = trail.load(&location.id).unwrap();
        prop_assert_eq!(loaded.to_decision().unwrap(), decision);
    }
}
