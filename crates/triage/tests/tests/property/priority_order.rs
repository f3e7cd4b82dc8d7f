//! Property tests: the first satisfied track in priority order is always chosen.

use proptest::prelude::*;
use triage_engine::select;
use triage_tests::fixed_engine;
use triage_thresholds::ThresholdSet;
use triage_types::TrackKind;

use super::strategies::{arb_counts, arb_request};

proptest! {
    /// The winner is satisfied and every earlier track is not.
    #[test]
    fn winner_is_first_satisfied_track(counts in arb_counts()) {
        let set = ThresholdSet::standard().unwrap();
        let selection = select(&set, &counts);

        let position = set
            .tracks()
            .iter()
            .position(|t| t.name() == selection.track)
            .unwrap();
        prop_assert!(set.tracks()[position].is_satisfied(&counts));
        for earlier in &set.tracks()[..position] {
            prop_assert!(!earlier.is_satisfied(&counts), "{} was satisfied", earlier.name());
        }
    }

    /// The catch-all wins exactly when nothing else matches.
    #[test]
    fn catch_all_iff_nothing_else_matches(counts in arb_counts()) {
        let set = ThresholdSet::standard().unwrap();
        let selection = select(&set, &counts);
        let any_other = set
            .tracks()
            .iter()
            .filter(|t| !t.kind().is_catch_all())
            .any(|t| t.is_satisfied(&counts));

        prop_assert_eq!(selection.kind == TrackKind::Clarification, !any_other);
    }

    /// Request text never changes the outcome.
    #[test]
    fn routing_ignores_request_text(
        counts in arb_counts(),
        a in arb_request(),
        b in arb_request(),
    ) {
        let engine = fixed_engine();
        let first = engine.route(&a, &counts);
        let second = engine.route(&b, &counts);

        prop_assert_eq!(first.track(), second.track());
        prop_assert_eq!(first.confidence(), second.confidence());
        prop_assert_eq!(first.primary_reason(), second.primary_reason());
        prop_assert_eq!(first.alternatives(), second.alternatives());
        prop_assert_eq!(first.artifact_id(), second.artifact_id());
    }

    /// Confidence is the chosen track's configured constant.
    #[test]
    fn confidence_is_per_track_constant(counts in arb_counts()) {
        let set = ThresholdSet::standard().unwrap();
        let selection = select(&set, &counts);
        let configured = set.by_name(&selection.track).unwrap().confidence();
        prop_assert_eq!(selection.confidence, configured);
    }
}
