//! Property tests: every rejected track gets a specific, concrete reason.

use proptest::prelude::*;
use triage_engine::{select, ExplanationRenderer};
use triage_tests::fixed_engine;
use triage_thresholds::ThresholdSet;
use triage_types::{ComponentCounts, Dimension};

use super::strategies::arb_counts;

proptest! {
    /// All other tracks are explained and each reason quotes a value from
    /// the counts, not just the priority order.
    #[test]
    fn alternatives_are_complete_and_concrete(counts in arb_counts()) {
        let set = ThresholdSet::standard().unwrap();
        let selection = select(&set, &counts);
        let observed = observed_values(&counts);

        prop_assert_eq!(selection.alternatives.len(), set.tracks().len() - 1);
        prop_assert!(!selection.alternatives.contains_key(&selection.track));
        for (track, reason) in &selection.alternatives {
            prop_assert!(
                values_outside_priority(reason).iter().any(|v| observed.contains(v)),
                "reason for {} quotes no counted value: {}", track, reason
            );
            prop_assert!(!reason.to_lowercase().contains("did not match"));
        }
    }

    /// Rejected tracks list exactly the violations their predicate reports.
    #[test]
    fn unsatisfied_tracks_list_their_violations(counts in arb_counts()) {
        let set = ThresholdSet::standard().unwrap();
        let selection = select(&set, &counts);

        for track in set.tracks().iter().filter(|t| !t.is_satisfied(&counts)) {
            let reason = &selection.alternatives[track.name()];
            for violation in track.violations(&counts) {
                let text = violation.to_string();
                prop_assert!(reason.contains(&text), "{} missing from {}", text, reason);
            }
        }
    }

    /// Rendering mentions the choice and every alternative, and is stable.
    #[test]
    fn rendering_covers_alternatives(counts in arb_counts()) {
        let decision = fixed_engine().route("render me", &counts);
        let text = ExplanationRenderer.render(&decision);

        let selected = format!("Selected `{}`", decision.track());
        prop_assert!(text.contains(&selected));
        for (track, reason) in decision.alternatives() {
            let line = format!("`{}`: {}", track, reason);
            prop_assert!(text.contains(&line));
        }

        let positions: Vec<usize> = decision
            .evaluation_order()
            .iter()
            .filter(|name| name.as_str() != decision.track())
            .filter_map(|name| text.find(&format!("\n  `{}`: ", name)))
            .collect();
        prop_assert_eq!(positions.len(), decision.alternatives().len());
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order:\n{}", text);
        prop_assert_eq!(text, ExplanationRenderer.render(&decision));
    }
}

fn observed_values(counts: &ComponentCounts) -> Vec<u64> {
    Dimension::STORED
        .iter()
        .chain(Dimension::DERIVED.iter())
        .map(|d| counts.get(*d))
        .collect()
}

/// Numbers in `reason`, ignoring the "(priority W before T)" clause.
fn values_outside_priority(reason: &str) -> Vec<u64> {
    let mut text = reason.to_string();
    if let Some(start) = text.find("(priority ") {
        if let Some(len) = text[start..].find(')') {
            text.replace_range(start..=start + len, "");
        }
    }
    text.split(|c: char| !c.is_ascii_digit())
        .filter_map(|token| token.parse().ok())
        .collect()
}
