//! End-to-end test: threshold configuration and live reload.
//!
//! Verifies that:
//! - A missing or invalid threshold file refuses to produce a registry
//! - Alternative threshold sets can be injected per engine
//! - A rejected reload leaves routing on the previous set

use std::sync::Arc;

use triage_engine::DecisionEngine;
use triage_thresholds::{ConfigurationError, ThresholdRegistry, ThresholdSet};
use triage_tests::{scenarios, widened_fix_toml, STANDARD_TOML};
use triage_types::ComponentCounts;

#[test]
fn startup_without_thresholds_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("thresholds.toml");
    assert!(matches!(
        ThresholdRegistry::load(&missing),
        Err(ConfigurationError::Io { .. })
    ));

    std::fs::write(&missing, "version = \"1.0.0\"\n").unwrap();
    assert!(matches!(
        ThresholdRegistry::load(&missing),
        Err(ConfigurationError::MissingTrack(_))
    ));
}

#[test]
fn engines_use_injected_thresholds() {
    let four_files = ComponentCounts::zero().with_files_to_modify(4);

    let standard = DecisionEngine::new(Arc::new(ThresholdRegistry::new(
        ThresholdSet::from_toml_str(STANDARD_TOML).unwrap(),
    )));
    let widened = DecisionEngine::new(Arc::new(ThresholdRegistry::new(
        ThresholdSet::from_toml_str(&widened_fix_toml("wide", 4)).unwrap(),
    )));

    assert_eq!(standard.evaluate(&four_files).track, "clarify");
    assert_eq!(widened.evaluate(&four_files).track, "fix");
    assert_eq!(
        standard.evaluate(&four_files).alternatives["fix"],
        "too many files changed (4 > 3 max)"
    );
}

#[test]
fn reload_from_file_and_reject_bad_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thresholds.toml");
    std::fs::write(&path, STANDARD_TOML).unwrap();

    let registry = Arc::new(ThresholdRegistry::load(&path).unwrap());
    let engine = DecisionEngine::new(Arc::clone(&registry));
    let four_files = ComponentCounts::zero().with_files_to_modify(4);
    assert_eq!(engine.route("r", &four_files).track(), "clarify");

    std::fs::write(&path, widened_fix_toml("1.1.0", 4)).unwrap();
    registry.reload_from_path(&path).unwrap();
    let d = engine.route("r", &four_files);
    assert_eq!(d.track(), "fix");
    assert_eq!(d.thresholds_version(), "1.1.0");

    let inverted =
        widened_fix_toml("1.2.0", 4).replace("{ min = 1, max = 4 }", "{ min = 9, max = 4 }");
    std::fs::write(&path, inverted).unwrap();
    assert!(matches!(
        registry.reload_from_path(&path),
        Err(ConfigurationError::InvertedBound { .. })
    ));
    assert_eq!(registry.version(), "1.1.0");
    assert_eq!(engine.route("r", &four_files).track(), "fix");
}

#[test]
fn scenario_routing_is_independent_of_track_order_in_file() {
    let reversed = {
        let set = ThresholdSet::from_toml_str(STANDARD_TOML).unwrap();
        let tracks = set.tracks().iter().rev().cloned().collect();
        ThresholdSet::new(set.version(), tracks).unwrap()
    };
    let engine = DecisionEngine::new(Arc::new(ThresholdRegistry::new(reversed)));
    assert_eq!(engine.evaluate(&scenarios::read_only_query()).track, "query");
    assert_eq!(engine.evaluate(&scenarios::designed_feature()).track, "feature");
}
