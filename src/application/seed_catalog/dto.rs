use crate::domain::shared::{collection::Collection, violation::Violation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One raw document read from a seed source.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedEntry {
    /// Collection wire name as given by the source; may be unknown.
    pub collection: String,
    /// Storage key the source filed the document under, if any. Must equal
    /// the document's `id` when present.
    pub key: Option<String>,
    pub document: Value,
}

impl SeedEntry {
    pub fn new(collection: impl Into<String>, document: Value) -> Self {
        Self {
            collection: collection.into(),
            key: None,
            document,
        }
    }

    pub fn keyed(collection: impl Into<String>, key: impl Into<String>, document: Value) -> Self {
        Self {
            collection: collection.into(),
            key: Some(key.into()),
            document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Upper bound on store writes in flight.
    pub write_concurrency: usize,
    /// Validate and resolve only; write nothing.
    pub dry_run: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            write_concurrency: 8,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub received: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub written: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub collection: String,
    pub id: Option<String>,
    pub violations: Vec<Violation>,
}

/// An accepted record the store did not take. The record stays accepted;
/// records that reference it may still have been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedWrite {
    pub collection: Collection,
    pub id: String,
    pub error: String,
}

/// Outcome of one load run. Always produced, even when the store fails
/// part-way; `aborted` then carries the reason and `written` what was
/// committed before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub total: usize,
    pub accepted: usize,
    pub written: usize,
    pub dry_run: bool,
    pub collections: BTreeMap<Collection, CollectionSummary>,
    pub rejected: Vec<RejectedRecord>,
    pub failed_writes: Vec<FailedWrite>,
    pub aborted: Option<String>,
}

impl LoadReport {
    /// True when every record was accepted, every write went through and the
    /// run was not aborted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.failed_writes.is_empty() && self.aborted.is_none()
    }

    pub fn violations_for(&self, collection: Collection, id: &str) -> Option<&[Violation]> {
        self.rejected
            .iter()
            .find(|r| r.collection == collection.as_str() && r.id.as_deref() == Some(id))
            .map(|r| r.violations.as_slice())
    }

    pub fn failed_write(&self, collection: Collection, id: &str) -> Option<&FailedWrite> {
        self.failed_writes
            .iter()
            .find(|f| f.collection == collection && f.id == id)
    }

    pub fn summary(&self, collection: Collection) -> CollectionSummary {
        self.collections.get(&collection).cloned().unwrap_or_default()
    }
}
