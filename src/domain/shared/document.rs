use super::{
    collection::Collection,
    schema::{FieldSpec, check_shape},
    value_objects::violations_from,
    violation::Violation,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use validator::Validate;

/// A foreign key held by a record: the value of `field` must be the id of a
/// record in `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub target: Collection,
    pub id: String,
}

impl Reference {
    pub fn new(field: &'static str, target: Collection, id: impl Into<String>) -> Self {
        Self {
            field,
            target,
            id: id.into(),
        }
    }

    pub fn many<'a>(
        field: &'static str,
        target: Collection,
        ids: impl IntoIterator<Item = &'a String>,
    ) -> impl Iterator<Item = Reference> {
        ids.into_iter()
            .map(move |id| Reference::new(field, target, id.clone()))
    }
}

/// Typed record kind that can be decoded from a raw seed document.
pub trait SeedDocument: Serialize + DeserializeOwned + Validate {
    const COLLECTION: Collection;

    /// Wire fields every document of this kind must carry.
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> &str;

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Constraints spanning more than one field.
    fn invariant_violations(&self) -> Vec<Violation> {
        Vec::new()
    }

    /// Shape check, deserialization, field constraints and invariants, in
    /// that order. Every violation found in a stage is returned.
    fn decode(document: &Value) -> Result<Self, Vec<Violation>> {
        let violations = check_shape(document, Self::FIELDS);
        if !violations.is_empty() {
            return Err(violations);
        }

        let record: Self = serde_json::from_value(document.clone())
            .map_err(|e| vec![Violation::invalid("record", e.to_string())])?;

        let mut violations = match record.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => violations_from(&errors),
        };
        violations.extend(record.invariant_violations());

        if violations.is_empty() {
            Ok(record)
        } else {
            Err(violations)
        }
    }
}
