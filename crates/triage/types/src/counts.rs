//! Component counts: the sole routing input.
//!
//! A [`ComponentCounts`] is an immutable description of how much a unit of work
//! touches. Stored fields are `u32`, so a constructed value can never hold a
//! negative count; loosely-typed input goes through [`ComponentCounts::from_json`],
//! which rejects bad fields by name instead of coercing them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ValidationError;

/// One scope dimension, either stored or derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    FilesToRead,
    FilesToModify,
    FilesToCreate,
    FilesToDelete,
    FunctionsAffected,
    ClassesAffected,
    TestsToWrite,
    TestsToModify,
    CrossModuleDeps,
    ExternalDeps,
    BreakingChanges,
    ArchitectureDecisions,
    /// Sum of the four file counts.
    TotalFiles,
    /// Tests to write plus tests to modify.
    TotalTestWork,
    /// Files modified, created or deleted. Not serialized.
    FilesChanged,
}

impl Dimension {
    /// The twelve stored counts, in serialization order.
    pub const STORED: [Dimension; 12] = [
        Dimension::FilesToRead,
        Dimension::FilesToModify,
        Dimension::FilesToCreate,
        Dimension::FilesToDelete,
        Dimension::FunctionsAffected,
        Dimension::ClassesAffected,
        Dimension::TestsToWrite,
        Dimension::TestsToModify,
        Dimension::CrossModuleDeps,
        Dimension::ExternalDeps,
        Dimension::BreakingChanges,
        Dimension::ArchitectureDecisions,
    ];

    /// Aggregates recomputed from the stored counts on every read.
    pub const DERIVED: [Dimension; 3] = [
        Dimension::TotalFiles,
        Dimension::TotalTestWork,
        Dimension::FilesChanged,
    ];

    /// Derived aggregates written to and accepted from JSON.
    pub const SERIALIZED_DERIVED: [Dimension; 2] =
        [Dimension::TotalFiles, Dimension::TotalTestWork];

    pub fn field_name(self) -> &'static str {
        match self {
            Self::FilesToRead => "files_to_read",
            Self::FilesToModify => "files_to_modify",
            Self::FilesToCreate => "files_to_create",
            Self::FilesToDelete => "files_to_delete",
            Self::FunctionsAffected => "functions_affected",
            Self::ClassesAffected => "classes_affected",
            Self::TestsToWrite => "tests_to_write",
            Self::TestsToModify => "tests_to_modify",
            Self::CrossModuleDeps => "cross_module_deps",
            Self::ExternalDeps => "external_deps",
            Self::BreakingChanges => "breaking_changes",
            Self::ArchitectureDecisions => "architecture_decisions",
            Self::TotalFiles => "total_files",
            Self::TotalTestWork => "total_test_work",
            Self::FilesChanged => "files_changed",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::STORED
            .into_iter()
            .chain(Self::DERIVED)
            .find(|d| d.field_name() == name)
    }

    pub fn is_derived(self) -> bool {
        Self::DERIVED.contains(&self)
    }

    /// Whether the dimension is a JSON field. `files_changed` is evaluation-only.
    pub fn is_serialized(self) -> bool {
        !self.is_derived() || Self::SERIALIZED_DERIVED.contains(&self)
    }

    /// Plural noun used in "too many"/"too few" phrasing.
    pub fn noun(self) -> &'static str {
        match self {
            Self::FilesToRead => "files to read",
            Self::FilesToModify => "files to modify",
            Self::FilesToCreate => "files to create",
            Self::FilesToDelete => "files to delete",
            Self::FunctionsAffected => "functions affected",
            Self::ClassesAffected => "classes affected",
            Self::TestsToWrite => "tests to write",
            Self::TestsToModify => "tests to modify",
            Self::CrossModuleDeps => "cross-module dependencies",
            Self::ExternalDeps => "external dependencies",
            Self::BreakingChanges => "breaking changes",
            Self::ArchitectureDecisions => "architecture decisions",
            Self::TotalFiles => "files",
            Self::TotalTestWork => "tests",
            Self::FilesChanged => "files changed",
        }
    }

    /// Phrase for a non-zero value where zero is required.
    pub fn presence_phrase(self) -> &'static str {
        match self {
            Self::FilesToRead => "reads files",
            Self::FilesToModify => "modifies files",
            Self::FilesToCreate => "creates files",
            Self::FilesToDelete => "deletes files",
            Self::FunctionsAffected => "affects functions",
            Self::ClassesAffected => "affects classes",
            Self::TestsToWrite => "writes tests",
            Self::TestsToModify => "modifies tests",
            Self::CrossModuleDeps => "crosses module boundaries",
            Self::ExternalDeps => "touches external dependencies",
            Self::BreakingChanges => "contains breaking changes",
            Self::ArchitectureDecisions => "requires architecture decisions",
            Self::TotalFiles => "touches files",
            Self::TotalTestWork => "involves test work",
            Self::FilesChanged => "changes files",
        }
    }

    /// Phrase for a zero value where at least one is required.
    pub fn absence_phrase(self) -> &'static str {
        match self {
            Self::FilesToRead => "no files to read",
            Self::FilesToModify => "no files to modify",
            Self::FilesToCreate => "no files to create",
            Self::FilesToDelete => "no files to delete",
            Self::FunctionsAffected => "no functions affected",
            Self::ClassesAffected => "no classes affected",
            Self::TestsToWrite => "no tests to write",
            Self::TestsToModify => "no tests to modify",
            Self::CrossModuleDeps => "no cross-module dependencies",
            Self::ExternalDeps => "no external dependencies",
            Self::BreakingChanges => "no breaking changes",
            Self::ArchitectureDecisions => "no architecture decisions needed",
            Self::TotalFiles => "no files involved",
            Self::TotalTestWork => "no test work planned",
            Self::FilesChanged => "no files changed",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Scope of a unit of work.
///
/// Derived aggregates are computed on every call and never cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComponentCounts {
    files_to_read: u32,
    files_to_modify: u32,
    files_to_create: u32,
    files_to_delete: u32,
    functions_affected: u32,
    classes_affected: u32,
    tests_to_write: u32,
    tests_to_modify: u32,
    cross_module_deps: u32,
    external_deps: u32,
    breaking_changes: u32,
    architecture_decisions: u32,
}

impl ComponentCounts {
    /// All-zero counts; combine with the `with_*` builders.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn with_files_to_read(mut self, n: u32) -> Self {
        self.files_to_read = n;
        self
    }

    pub fn with_files_to_modify(mut self, n: u32) -> Self {
        self.files_to_modify = n;
        self
    }

    pub fn with_files_to_create(mut self, n: u32) -> Self {
        self.files_to_create = n;
        self
    }

    pub fn with_files_to_delete(mut self, n: u32) -> Self {
        self.files_to_delete = n;
        self
    }

    pub fn with_functions_affected(mut self, n: u32) -> Self {
        self.functions_affected = n;
        self
    }

    pub fn with_classes_affected(mut self, n: u32) -> Self {
        self.classes_affected = n;
        self
    }

    pub fn with_tests_to_write(mut self, n: u32) -> Self {
        self.tests_to_write = n;
        self
    }

    pub fn with_tests_to_modify(mut self, n: u32) -> Self {
        self.tests_to_modify = n;
        self
    }

    pub fn with_cross_module_deps(mut self, n: u32) -> Self {
        self.cross_module_deps = n;
        self
    }

    pub fn with_external_deps(mut self, n: u32) -> Self {
        self.external_deps = n;
        self
    }

    pub fn with_breaking_changes(mut self, n: u32) -> Self {
        self.breaking_changes = n;
        self
    }

    pub fn with_architecture_decisions(mut self, n: u32) -> Self {
        self.architecture_decisions = n;
        self
    }

    pub fn files_to_read(&self) -> u32 {
        self.files_to_read
    }

    pub fn files_to_modify(&self) -> u32 {
        self.files_to_modify
    }

    pub fn files_to_create(&self) -> u32 {
        self.files_to_create
    }

    pub fn files_to_delete(&self) -> u32 {
        self.files_to_delete
    }

    pub fn functions_affected(&self) -> u32 {
        self.functions_affected
    }

    pub fn classes_affected(&self) -> u32 {
        self.classes_affected
    }

    pub fn tests_to_write(&self) -> u32 {
        self.tests_to_write
    }

    pub fn tests_to_modify(&self) -> u32 {
        self.tests_to_modify
    }

    pub fn cross_module_deps(&self) -> u32 {
        self.cross_module_deps
    }

    pub fn external_deps(&self) -> u32 {
        self.external_deps
    }

    pub fn breaking_changes(&self) -> u32 {
        self.breaking_changes
    }

    pub fn architecture_decisions(&self) -> u32 {
        self.architecture_decisions
    }

    /// Sum of the four file counts.
    pub fn total_files(&self) -> u64 {
        u64::from(self.files_to_read) + self.files_changed()
    }

    /// Tests to write plus tests to modify.
    pub fn total_test_work(&self) -> u64 {
        u64::from(self.tests_to_write) + u64::from(self.tests_to_modify)
    }

    /// Files modified, created or deleted.
    pub fn files_changed(&self) -> u64 {
        u64::from(self.files_to_modify)
            + u64::from(self.files_to_create)
            + u64::from(self.files_to_delete)
    }

    /// True when nothing is modified, created, deleted or tested.
    pub fn is_read_only(&self) -> bool {
        self.files_changed() == 0 && self.total_test_work() == 0
    }

    /// Value of any dimension, stored or derived.
    pub fn get(&self, dimension: Dimension) -> u64 {
        match dimension {
            Dimension::FilesToRead => self.files_to_read.into(),
            Dimension::FilesToModify => self.files_to_modify.into(),
            Dimension::FilesToCreate => self.files_to_create.into(),
            Dimension::FilesToDelete => self.files_to_delete.into(),
            Dimension::FunctionsAffected => self.functions_affected.into(),
            Dimension::ClassesAffected => self.classes_affected.into(),
            Dimension::TestsToWrite => self.tests_to_write.into(),
            Dimension::TestsToModify => self.tests_to_modify.into(),
            Dimension::CrossModuleDeps => self.cross_module_deps.into(),
            Dimension::ExternalDeps => self.external_deps.into(),
            Dimension::BreakingChanges => self.breaking_changes.into(),
            Dimension::ArchitectureDecisions => self.architecture_decisions.into(),
            Dimension::TotalFiles => self.total_files(),
            Dimension::TotalTestWork => self.total_test_work(),
            Dimension::FilesChanged => self.files_changed(),
        }
    }

    fn slot(&mut self, dimension: Dimension) -> Option<&mut u32> {
        match dimension {
            Dimension::FilesToRead => Some(&mut self.files_to_read),
            Dimension::FilesToModify => Some(&mut self.files_to_modify),
            Dimension::FilesToCreate => Some(&mut self.files_to_create),
            Dimension::FilesToDelete => Some(&mut self.files_to_delete),
            Dimension::FunctionsAffected => Some(&mut self.functions_affected),
            Dimension::ClassesAffected => Some(&mut self.classes_affected),
            Dimension::TestsToWrite => Some(&mut self.tests_to_write),
            Dimension::TestsToModify => Some(&mut self.tests_to_modify),
            Dimension::CrossModuleDeps => Some(&mut self.cross_module_deps),
            Dimension::ExternalDeps => Some(&mut self.external_deps),
            Dimension::BreakingChanges => Some(&mut self.breaking_changes),
            Dimension::ArchitectureDecisions => Some(&mut self.architecture_decisions),
            Dimension::TotalFiles | Dimension::TotalTestWork | Dimension::FilesChanged => None,
        }
    }

    /// Validate loosely-typed counts.
    ///
    /// Every stored field must be present as a non-negative integer that fits
    /// in `u32`. Derived fields may be present but must equal their sums.
    /// Unknown keys are rejected.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let map = value
            .as_object()
            .ok_or_else(|| ValidationError::NotAnObject(json_kind(value).to_string()))?;

        if let Some(unknown) = map
            .keys()
            .find(|k| !Dimension::from_field_name(k).is_some_and(Dimension::is_serialized))
        {
            return Err(ValidationError::UnknownField(unknown.clone()));
        }

        let mut counts = Self::zero();
        for dimension in Dimension::STORED {
            let field = dimension.field_name();
            let raw = map.get(field).ok_or(ValidationError::Missing { field })?;
            let value = parse_count(field, raw)?;
            let max = u64::from(u32::MAX);
            if value > max {
                return Err(ValidationError::OutOfRange { field, value, max });
            }
            if let Some(slot) = counts.slot(dimension) {
                *slot = value as u32;
            }
        }

        for dimension in Dimension::SERIALIZED_DERIVED {
            let field = dimension.field_name();
            if let Some(raw) = map.get(field) {
                let found = parse_count(field, raw)?;
                let expected = counts.get(dimension);
                if found != expected {
                    return Err(ValidationError::DerivedMismatch {
                        field,
                        found,
                        expected,
                    });
                }
            }
        }

        Ok(counts)
    }

    /// JSON form: the twelve stored fields plus `total_files` and `total_test_work`.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for dimension in Dimension::STORED {
            map.insert(dimension.field_name().into(), self.get(dimension).into());
        }
        for dimension in Dimension::SERIALIZED_DERIVED {
            map.insert(dimension.field_name().into(), self.get(dimension).into());
        }
        Value::Object(map)
    }
}

fn parse_count(field: &'static str, raw: &Value) -> Result<u64, ValidationError> {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(v) = n.as_i64() {
                Err(ValidationError::Negative {
                    field,
                    value: v.to_string(),
                })
            } else {
                Err(ValidationError::NotInteger {
                    field,
                    value: n.to_string(),
                })
            }
        }
        other => Err(ValidationError::NotInteger {
            field,
            value: other.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<Value> for ComponentCounts {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl Serialize for ComponentCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ComponentCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
