//! Per-track predicates over [`ComponentCounts`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use triage_types::{ComponentCounts, Confidence, Dimension, TrackKind};

/// Inclusive bounds on one dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl Bound {
    pub fn at_least(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn check(self, dimension: Dimension, value: u64) -> Option<Violation> {
        if let Some(min) = self.min {
            if value < min {
                return Some(Violation::BelowMin {
                    dimension,
                    value,
                    min,
                });
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(Violation::AboveMax {
                    dimension,
                    value,
                    max,
                });
            }
        }
        None
    }
}

/// One unmet condition of a track predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    AboveMax {
        dimension: Dimension,
        value: u64,
        max: u64,
    },
    BelowMin {
        dimension: Dimension,
        value: u64,
        min: u64,
    },
    NotReadOnly {
        modify: u32,
        create: u32,
        delete: u32,
        tests: u64,
    },
    MissingTests,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AboveMax {
                dimension,
                value,
                max: 0,
            } => write!(f, "{} ({} > 0 max)", dimension.presence_phrase(), value),
            Self::AboveMax {
                dimension,
                value,
                max,
            } => write!(f, "too many {} ({} > {} max)", dimension.noun(), value, max),
            Self::BelowMin {
                dimension,
                value: 0,
                min,
            } => write!(f, "{} (0 < {} min)", dimension.absence_phrase(), min),
            Self::BelowMin {
                dimension,
                value,
                min,
            } => write!(f, "too few {} ({} < {} min)", dimension.noun(), value, min),
            Self::NotReadOnly {
                modify,
                create,
                delete,
                tests,
            } => write!(
                f,
                "not read-only (modify {}, create {}, delete {}, tests {})",
                modify, create, delete, tests
            ),
            Self::MissingTests => f.write_str("no test work planned (0 tests to write or modify)"),
        }
    }
}

/// A named handling track and its predicate.
///
/// Immutable once part of a [`ThresholdSet`](crate::ThresholdSet).
#[derive(Clone, Debug, PartialEq)]
pub struct TrackThreshold {
    name: String,
    kind: TrackKind,
    confidence: Confidence,
    bounds: BTreeMap<Dimension, Bound>,
    read_only: bool,
    requires_tests: bool,
}

impl TrackThreshold {
    pub fn new(name: impl Into<String>, kind: TrackKind, confidence: Confidence) -> Self {
        Self {
            name: name.into(),
            kind,
            confidence,
            bounds: BTreeMap::new(),
            read_only: false,
            requires_tests: false,
        }
    }

    pub fn with_bound(mut self, dimension: Dimension, bound: Bound) -> Self {
        self.bounds.insert(dimension, bound);
        self
    }

    /// Require that nothing is modified, created, deleted or tested.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Require at least one test to write or modify.
    pub fn requiring_tests(mut self) -> Self {
        self.requires_tests = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn bounds(&self) -> &BTreeMap<Dimension, Bound> {
        &self.bounds
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn requires_tests(&self) -> bool {
        self.requires_tests
    }

    /// No bounds and no flags: matches every input.
    pub fn is_unconstrained(&self) -> bool {
        self.bounds.is_empty() && !self.read_only && !self.requires_tests
    }

    /// Every unmet condition, flags first then bounds in dimension order.
    pub fn violations(&self, counts: &ComponentCounts) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.read_only && !counts.is_read_only() {
            violations.push(Violation::NotReadOnly {
                modify: counts.files_to_modify(),
                create: counts.files_to_create(),
                delete: counts.files_to_delete(),
                tests: counts.total_test_work(),
            });
        }
        if self.requires_tests && counts.total_test_work() == 0 {
            violations.push(Violation::MissingTests);
        }

        violations.extend(
            self.bounds
                .iter()
                .filter_map(|(dimension, bound)| bound.check(*dimension, counts.get(*dimension))),
        );
        violations
    }

    pub fn is_satisfied(&self, counts: &ComponentCounts) -> bool {
        self.violations(counts).is_empty()
    }
}
