//! Shared fixtures for the Triage integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use triage_engine::DecisionEngine;
use triage_thresholds::{ThresholdRegistry, ThresholdSet};
use triage_types::{ComponentCounts, FixedClock, SteppingClock};

/// Bundled thresholds as TOML, for tests that derive variants from them.
pub const STANDARD_TOML: &str = include_str!("../../thresholds/thresholds.toml");

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid fixture instant")
}

pub fn standard_registry() -> Arc<ThresholdRegistry> {
    let set = ThresholdSet::standard().expect("bundled thresholds are valid");
    Arc::new(ThresholdRegistry::new(set))
}

/// Engine on a frozen clock with a fixed salt.
pub fn fixed_engine() -> DecisionEngine {
    DecisionEngine::new(standard_registry())
        .with_clock(FixedClock::new(epoch()))
        .with_salt("fixture")
}

/// Engine whose clock advances `step_micros` per decision, so every decision
/// gets its own timestamp and identifier.
pub fn stepping_engine(
    registry: Arc<ThresholdRegistry>,
    salt: &str,
    step_micros: i64,
) -> DecisionEngine {
    DecisionEngine::new(registry)
        .with_clock(SteppingClock::new(epoch(), Duration::microseconds(step_micros)))
        .with_salt(salt)
}

/// Standard thresholds with a different version and the scoped-fix file limit raised.
pub fn widened_fix_toml(version: &str, max_files: u64) -> String {
    STANDARD_TOML
        .replace("version = \"1.0.0\"", &format!("version = \"{}\"", version))
        .replace(
            "files_changed = { min = 1, max = 3 }",
            &format!("files_changed = {{ min = 1, max = {} }}", max_files),
        )
}

pub mod scenarios {
    use super::ComponentCounts;

    pub fn small_fix() -> ComponentCounts {
        ComponentCounts::zero()
            .with_files_to_modify(1)
            .with_functions_affected(2)
            .with_tests_to_modify(1)
    }

    pub fn read_only_query() -> ComponentCounts {
        ComponentCounts::zero().with_files_to_read(3)
    }

    pub fn designed_feature() -> ComponentCounts {
        ComponentCounts::zero()
            .with_files_to_create(3)
            .with_files_to_modify(2)
            .with_functions_affected(8)
            .with_tests_to_write(5)
            .with_architecture_decisions(2)
            .with_cross_module_deps(1)
    }

    pub fn coordinated() -> ComponentCounts {
        ComponentCounts::zero()
            .with_files_to_modify(15)
            .with_functions_affected(40)
            .with_tests_to_modify(20)
            .with_cross_module_deps(5)
            .with_breaking_changes(2)
            .with_architecture_decisions(3)
    }

    pub fn empty() -> ComponentCounts {
        ComponentCounts::zero()
    }
}
