//! Handling tracks and their fixed priority order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a handling track plays in routing.
///
/// Tracks are always evaluated in [`TrackKind::PRIORITY`] order: narrow tracks
/// before broad ones, the catch-all last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Answers questions; nothing is mutated.
    ReadOnlyQuery,
    /// Smallest-scope mutation.
    ScopedFix,
    /// Medium-scope work needing design decisions.
    DesignedFeature,
    /// Large-scope work split across coordinated efforts.
    Coordinated,
    /// Catch-all: always matches.
    Clarification,
}

impl TrackKind {
    pub const PRIORITY: [TrackKind; 5] = [
        TrackKind::ReadOnlyQuery,
        TrackKind::ScopedFix,
        TrackKind::DesignedFeature,
        TrackKind::Coordinated,
        TrackKind::Clarification,
    ];

    /// 1-based evaluation rank.
    pub fn priority(self) -> usize {
        match self {
            Self::ReadOnlyQuery => 1,
            Self::ScopedFix => 2,
            Self::DesignedFeature => 3,
            Self::Coordinated => 4,
            Self::Clarification => 5,
        }
    }

    pub fn is_catch_all(self) -> bool {
        matches!(self, Self::Clarification)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ReadOnlyQuery => "read-only query",
            Self::ScopedFix => "scoped fix",
            Self::DesignedFeature => "designed feature",
            Self::Coordinated => "parallel coordinated effort",
            Self::Clarification => "needs clarification",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnlyQuery => "read_only_query",
            Self::ScopedFix => "scoped_fix",
            Self::DesignedFeature => "designed_feature",
            Self::Coordinated => "coordinated",
            Self::Clarification => "clarification",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
