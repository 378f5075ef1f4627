use super::collection::Collection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A constraint a seed record failed.
///
/// Violations are record-level and never abort a batch; they end up in the
/// load report next to the record that caused them.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind")]
#[ts(export)]
pub enum Violation {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("duplicate `{field}` value `{value}`")]
    DuplicateKey { field: String, value: String },

    #[error("`{field}` references unknown {target} record `{id}`")]
    DanglingReference {
        field: String,
        target: Collection,
        id: String,
    },
}

impl Violation {
    pub fn missing(field: impl Into<String>) -> Self {
        Violation::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Violation::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        Violation::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Wire name of the field the violation is about.
    pub fn field(&self) -> &str {
        match self {
            Violation::MissingField { field }
            | Violation::InvalidValue { field, .. }
            | Violation::DuplicateKey { field, .. }
            | Violation::DanglingReference { field, .. } => field,
        }
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, Violation::MissingField { .. })
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Violation::InvalidValue { .. })
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Violation::DuplicateKey { .. })
    }

    pub fn is_dangling_reference(&self) -> bool {
        matches!(self, Violation::DanglingReference { .. })
    }
}
