//! Shared proptest strategies.

use proptest::prelude::*;
use triage_types::ComponentCounts;

/// A count biased toward the small values where track boundaries sit.
pub fn arb_count() -> impl Strategy<Value = u32> {
    prop_oneof![
        4 => 0u32..=6,
        2 => 0u32..=20,
        1 => 0u32..=500,
    ]
}

/// Arbitrary counts, including all-zero and read-only shapes.
pub fn arb_counts() -> impl Strategy<Value = ComponentCounts> {
    (
        (arb_count(), arb_count(), arb_count(), arb_count()),
        (arb_count(), arb_count(), arb_count(), arb_count()),
        (arb_count(), arb_count(), arb_count(), arb_count()),
        any::<bool>(),
    )
        .prop_map(
            |(
                (read, modify, create, delete),
                (funcs, classes, tw, tm),
                (cross, ext, breaking, arch),
                read_only,
            )| {
                let counts = ComponentCounts::zero()
                    .with_files_to_read(read)
                    .with_functions_affected(funcs)
                    .with_classes_affected(classes)
                    .with_cross_module_deps(cross)
                    .with_external_deps(ext)
                    .with_breaking_changes(breaking)
                    .with_architecture_decisions(arch);
                if read_only {
                    counts
                } else {
                    counts
                        .with_files_to_modify(modify)
                        .with_files_to_create(create)
                        .with_files_to_delete(delete)
                        .with_tests_to_write(tw)
                        .with_tests_to_modify(tm)
                }
            },
        )
}

/// Free-text requests, including empty and non-ASCII ones.
pub fn arb_request() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{1,40}",
        "\\PC{0,60}",
    ]
}
