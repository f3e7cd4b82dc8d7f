//! Validation errors for Triage value types.

use thiserror::Error;

/// Rejection of malformed component counts.
///
/// Raised before any routing logic runs. Values are never clamped or coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("counts must be a JSON object, found {0}")]
    NotAnObject(String),

    #[error("count `{field}` is missing")]
    Missing { field: &'static str },

    #[error("count `{field}` is negative ({value})")]
    Negative { field: &'static str, value: String },

    #[error("count `{field}` is not an integer ({value})")]
    NotInteger { field: &'static str, value: String },

    #[error("count `{field}` is out of range ({value} > {max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("unknown count `{0}`")]
    UnknownField(String),

    #[error("derived count `{field}` is {found} but its components sum to {expected}")]
    DerivedMismatch {
        field: &'static str,
        found: u64,
        expected: u64,
    },
}

impl ValidationError {
    /// Name of the offending field, when the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject(_) => None,
            Self::Missing { field }
            | Self::Negative { field, .. }
            | Self::NotInteger { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::DerivedMismatch { field, .. } => Some(field),
            Self::UnknownField(field) => Some(field),
        }
    }
}

/// A confidence value outside `[0, 1]` (or NaN).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("confidence {0} is outside [0, 1]")]
pub struct InvalidConfidence(pub f64);

/// A string that does not have the `YYYYMMDD-<16 hex>` artifact id shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid artifact id `{value}`: {reason}")]
pub struct InvalidArtifactId {
    pub value: String,
    pub reason: &'static str,
}
