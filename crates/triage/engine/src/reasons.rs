//! Human-readable reasons for selected and rejected tracks.
//!
//! Every string produced here names concrete values from the counts or the
//! priority order; none is a bare "did not match".

use triage_thresholds::{Bound, TrackThreshold, Violation};
use triage_types::{ComponentCounts, Dimension, TrackKind};

/// Reason a track lost because its predicate failed.
pub fn rejection(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reason a satisfied track lost to a higher-priority winner.
///
/// A catch-all loser is explained by what the winner matched on.
pub fn outranked(
    track: &TrackThreshold,
    winner: &TrackThreshold,
    counts: &ComponentCounts,
) -> String {
    let order = format!(
        "priority {} before {}",
        winner.kind().priority(),
        track.kind().priority()
    );
    if track.is_unconstrained() {
        let matched = satisfied_conditions(winner, counts);
        let matched = if matched.is_empty() {
            scope_summary(counts)
        } else {
            matched.join(", ")
        };
        return format!(
            "not needed: `{}` matched first ({}): {}",
            winner.name(),
            order,
            matched
        );
    }
    format!(
        "also satisfied, but `{}` takes precedence ({}): {}",
        winner.name(),
        order,
        satisfied_conditions(track, counts).join(", ")
    )
}

fn satisfied_conditions(track: &TrackThreshold, counts: &ComponentCounts) -> Vec<String> {
    let mut met = Vec::new();
    if track.is_read_only() {
        met.push(format!(
            "read-only ({} changed, {} tests)",
            counts.files_changed(),
            counts.total_test_work()
        ));
    }
    if track.requires_tests() {
        met.push(format!("tests {} >= 1", counts.total_test_work()));
    }
    for (dimension, bound) in track.bounds() {
        met.push(describe_bound(*dimension, *bound, counts.get(*dimension)));
    }
    met
}

fn scope_summary(counts: &ComponentCounts) -> String {
    format!(
        "files changed {}, files to read {}, tests {}",
        counts.files_changed(),
        counts.files_to_read(),
        counts.total_test_work()
    )
}

fn describe_bound(dimension: Dimension, bound: Bound, value: u64) -> String {
    let noun = dimension.noun();
    match (bound.min, bound.max) {
        (Some(min), Some(max)) => format!("{} {} within {}..={}", noun, value, min, max),
        (Some(min), None) => format!("{} {} >= {} min", noun, value, min),
        (None, Some(max)) => format!("{} {} <= {} max", noun, value, max),
        (None, None) => format!("{} {}", noun, value),
    }
}

/// Positively stated reason the winning track matched.
pub fn primary(track: &TrackThreshold, counts: &ComponentCounts) -> String {
    match track.kind() {
        TrackKind::ReadOnlyQuery => format!(
            "read-only request: {} to read, nothing modified, created or deleted",
            plural(counts.files_to_read().into(), "file", "files")
        ),
        TrackKind::ScopedFix => format!(
            "small, contained change: {} changed, {} affected, \
             no breaking changes or architecture decisions",
            plural(counts.files_changed(), "file", "files"),
            plural(counts.functions_affected().into(), "function", "functions")
        ),
        TrackKind::DesignedFeature => format!(
            "designed feature: {} changed, {} to make, {} planned",
            plural(counts.files_changed(), "file", "files"),
            plural(
                counts.architecture_decisions().into(),
                "architecture decision",
                "architecture decisions"
            ),
            plural(counts.total_test_work(), "test", "tests")
        ),
        TrackKind::Coordinated => format!(
            "large coordinated change: {} changed across {}, {}, {} planned",
            plural(counts.files_changed(), "file", "files"),
            plural(
                counts.cross_module_deps().into(),
                "cross-module dependency",
                "cross-module dependencies"
            ),
            plural(counts.breaking_changes().into(), "breaking change", "breaking changes"),
            plural(counts.total_test_work(), "test", "tests")
        ),
        TrackKind::Clarification => {
            if *counts == ComponentCounts::zero() {
                "requirements need clarification: no scope was provided (all counts are 0)"
                    .to_string()
            } else {
                format!(
                    "requirements need clarification: scope of {} changed, {} to read \
                     and {} fits no defined track",
                    plural(counts.files_changed(), "file", "files"),
                    plural(counts.files_to_read().into(), "file", "files"),
                    plural(counts.total_test_work(), "test", "tests")
                )
            }
        }
    }
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", n, many)
    }
}
