//! Wire-level shape checks for raw seed documents.
//!
//! A document is checked against its field table before it is deserialized,
//! so every missing or mistyped field can be reported by name instead of
//! failing on the first serde error.

use super::violation::Violation;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// JSON type a wire field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    /// Any JSON number.
    Float,
    /// A JSON integer that is zero or greater.
    UnsignedInteger,
    /// Array whose elements are all strings.
    StringList,
    /// RFC 3339 timestamp string.
    Timestamp,
    /// String restricted to a closed set of wire names.
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

pub const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Checks presence and JSON type of every field in `fields`.
///
/// `null` counts as missing. Fields not listed are ignored.
pub fn check_shape(document: &Value, fields: &[FieldSpec]) -> Vec<Violation> {
    let Some(object) = document.as_object() else {
        return vec![Violation::invalid("record", "expected a JSON object")];
    };

    fields
        .iter()
        .filter_map(|expected_field| match object.get(expected_field.name) {
            None | Some(Value::Null) => Some(Violation::missing(expected_field.name)),
            Some(value) => check_kind(expected_field, value).err(),
        })
        .collect()
}

fn check_kind(expected_field: &FieldSpec, value: &Value) -> Result<(), Violation> {
    let mismatch =
        |expected: &str| Violation::invalid(expected_field.name, format!("expected {expected}"));

    match expected_field.kind {
        FieldKind::String => value.as_str().map(|_| ()).ok_or_else(|| mismatch("a string")),
        FieldKind::Bool => value.as_bool().map(|_| ()).ok_or_else(|| mismatch("a boolean")),
        FieldKind::Float => value.as_f64().map(|_| ()).ok_or_else(|| mismatch("a number")),
        FieldKind::UnsignedInteger => value
            .as_u64()
            .map(|_| ())
            .ok_or_else(|| mismatch("a non-negative integer")),
        FieldKind::StringList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Ok(()),
            _ => Err(mismatch("a list of strings")),
        },
        FieldKind::Timestamp => match value.as_str() {
            Some(raw) => raw
                .parse::<DateTime<Utc>>()
                .map(|_| ())
                .map_err(|e| {
                    Violation::invalid(expected_field.name, format!("invalid timestamp: {e}"))
                }),
            None => Err(mismatch("an RFC 3339 timestamp string")),
        },
        FieldKind::OneOf(allowed) => match value.as_str() {
            Some(raw) if allowed.contains(&raw) => Ok(()),
            Some(raw) => Err(Violation::invalid(
                expected_field.name,
                format!("`{raw}` is not one of {}", allowed.join(", ")),
            )),
            None => Err(mismatch("a string")),
        },
    }
}
