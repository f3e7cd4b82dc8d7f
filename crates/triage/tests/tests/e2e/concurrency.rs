//! End-to-end test: concurrent routing, reloads and saves.
//!
//! Verifies that:
//! - Routing during reloads always sees one complete threshold set
//! - Concurrent saves into the same date partition all succeed
//! - Readers listing a partition mid-save only ever load complete artifacts

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use triage_audit::{AuditTrail, FileAuditTrail, PersistenceError};
use triage_engine::DecisionEngine;
use triage_thresholds::ThresholdSet;
use triage_tests::{epoch, scenarios, standard_registry, stepping_engine, widened_fix_toml};
use triage_types::ComponentCounts;

#[test]
fn routing_never_sees_a_mixed_threshold_set() {
    let registry = standard_registry();
    let engine = Arc::new(DecisionEngine::new(Arc::clone(&registry)));
    let standard = ThresholdSet::standard().unwrap();
    let widened = ThresholdSet::from_toml_str(&widened_fix_toml("1.1.0", 4)).unwrap();
    let four_files = ComponentCounts::zero().with_files_to_modify(4);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..200 {
                let next = if i % 2 == 0 { widened.clone() } else { standard.clone() };
                registry.reload(next);
            }
            done.store(true, Ordering::SeqCst);
        });

        for _ in 0..4 {
            let engine = Arc::clone(&engine);
            let done = &done;
            s.spawn(move || {
                let mut routed = 0;
                while !done.load(Ordering::SeqCst) || routed < 100 {
                    let d = engine.route("concurrent", &four_files);
                    let expected = match d.thresholds_version() {
                        "1.0.0" => "clarify",
                        "1.1.0" => "fix",
                        other => panic!("unexpected thresholds version {other}"),
                    };
                    assert_eq!(d.track(), expected);
                    routed += 1;
                }
            });
        }
    });
}

#[test]
fn concurrent_saves_share_a_partition() {
    let dir = tempfile::tempdir().unwrap();
    let trail = Arc::new(FileAuditTrail::new(dir.path()));
    let registry = standard_registry();

    let ids: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let trail = Arc::clone(&trail);
                let engine =
                    stepping_engine(Arc::clone(&registry), &format!("worker-{worker}"), 10);
                s.spawn(move || {
                    (0..40)
                        .map(|_| {
                            let decision = engine.route("parallel", &scenarios::small_fix());
                            trail.save(&decision).unwrap().id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(ids.len(), 320);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 320);
    assert_eq!(trail.list(epoch().date_naive()).unwrap().len(), 320);
}

#[test]
fn readers_never_see_partial_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let trail = FileAuditTrail::new(dir.path());
    let engine = stepping_engine(standard_registry(), "writer", 10);
    let date = epoch().date_naive();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..200 {
                let decision = engine.route("staged", &scenarios::designed_feature());
                trail.save(&decision).unwrap();
            }
            done.store(true, Ordering::SeqCst);
        });

        s.spawn(|| {
            while !done.load(Ordering::SeqCst) {
                for id in trail.list(date).unwrap() {
                    match trail.load(&id) {
                        Ok(artifact) => assert_eq!(artifact.id, id),
                        Err(e @ PersistenceError::Corrupt { .. }) => {
                            panic!("listed artifact was incomplete: {e}")
                        }
                        Err(e) => panic!("unexpected load failure: {e}"),
                    }
                }
            }
        });
    });

    assert_eq!(trail.list(date).unwrap().len(), 200);
}
