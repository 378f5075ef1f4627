use super::dto::SeedEntry;
use crate::domain::{
    record::SeedRecord,
    shared::{collection::Collection, violation::Violation},
};
use serde_json::Value;
use std::collections::{HashMap, HashSet, hash_map::Entry};
use tracing::debug;

#[derive(Debug)]
pub(crate) struct StagedEntry {
    pub collection_name: String,
    pub collection: Option<Collection>,
    pub id: Option<String>,
    pub record: Option<SeedRecord>,
    pub violations: Vec<Violation>,
}

impl StagedEntry {
    pub fn is_accepted(&self) -> bool {
        self.record.is_some() && self.violations.is_empty()
    }
}

/// In-memory staging map for one load run.
///
/// Entries are kept in input order. Reference and e-mail checks run only once
/// every entry is staged, so a record may point at one that appears later.
#[derive(Debug, Default)]
pub(crate) struct StagingArea {
    entries: Vec<StagedEntry>,
    ids: HashSet<(Collection, String)>,
}

impl StagingArea {
    pub fn stage(&mut self, entry: SeedEntry) {
        let SeedEntry {
            collection: collection_name,
            key,
            document,
        } = entry;
        let id = document
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let reported_id = id.clone().or_else(|| key.clone());

        let collection = match collection_name.parse::<Collection>() {
            Ok(collection) => collection,
            Err(e) => {
                self.entries.push(StagedEntry {
                    collection_name,
                    collection: None,
                    id: reported_id,
                    record: None,
                    violations: vec![Violation::invalid("collection", e.to_string())],
                });
                return;
            }
        };

        let mut violations = Vec::new();

        if let (Some(key), Some(id)) = (key.as_deref(), id.as_deref()) {
            if key != id {
                violations.push(Violation::invalid(
                    "id",
                    format!("`{id}` does not match document key `{key}`"),
                ));
            }
        }

        // First occurrence of an id owns it, valid or not.
        if let Some(id) = &id {
            if !self.ids.insert((collection, id.clone())) {
                violations.push(Violation::duplicate("id", id.clone()));
            }
        }

        let record = match SeedRecord::decode(collection, &document) {
            Ok(record) => Some(record),
            Err(found) => {
                violations.extend(found);
                None
            }
        };

        self.entries.push(StagedEntry {
            collection_name,
            collection: Some(collection),
            id: reported_id,
            record,
            violations,
        });
    }

    /// Rejects every accepted record holding a reference to a record that is
    /// not accepted, then every user whose e-mail an earlier accepted user
    /// already holds. Repeats until nothing changes, so rejections cascade to
    /// dependents. Returns the number of records rejected.
    pub fn resolve_references(&mut self) -> usize {
        let mut rejected = 0;
        loop {
            rejected += self.reject_dangling();
            let duplicates = self.reject_duplicate_emails();
            if duplicates == 0 {
                break;
            }
            rejected += duplicates;
        }
        rejected
    }

    fn reject_dangling(&mut self) -> usize {
        let mut rejected = 0;
        let mut round = 0;

        loop {
            round += 1;
            let accepted = self.accepted_ids();

            let dangling: Vec<(usize, Vec<Violation>)> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.is_accepted())
                .filter_map(|(index, entry)| {
                    let record = entry.record.as_ref()?;
                    let violations: Vec<Violation> = record
                        .references()
                        .into_iter()
                        .filter(|r| {
                            !accepted
                                .get(&r.target)
                                .is_some_and(|ids| ids.contains(r.id.as_str()))
                        })
                        .map(|r| Violation::DanglingReference {
                            field: r.field.to_string(),
                            target: r.target,
                            id: r.id,
                        })
                        .collect();
                    (!violations.is_empty()).then_some((index, violations))
                })
                .collect();

            if dangling.is_empty() {
                break;
            }

            debug!(round, newly_rejected = dangling.len(), "Dangling references found");
            rejected += dangling.len();
            for (index, violations) in dangling {
                self.entries[index].violations.extend(violations);
            }
        }

        rejected
    }

    /// E-mails are owned by the first accepted user carrying them, compared
    /// case-insensitively. A user rejected for any other reason owns nothing.
    fn reject_duplicate_emails(&mut self) -> usize {
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut rejected = 0;

        for entry in self.entries.iter_mut().filter(|entry| entry.is_accepted()) {
            let Some(SeedRecord::User(user)) = &entry.record else {
                continue;
            };
            match owners.entry(user.normalized_email()) {
                Entry::Occupied(owner) => {
                    debug!(user = %user.id, owner = %owner.get(), "E-mail already taken");
                    entry
                        .violations
                        .push(Violation::duplicate("email", user.email.clone()));
                    rejected += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(user.id.clone());
                }
            }
        }

        rejected
    }

    pub fn into_entries(self) -> Vec<StagedEntry> {
        self.entries
    }

    fn accepted_ids(&self) -> HashMap<Collection, HashSet<String>> {
        let mut ids: HashMap<Collection, HashSet<String>> = HashMap::new();
        for record in self.entries.iter().filter_map(|entry| {
            entry
                .is_accepted()
                .then_some(entry.record.as_ref())
                .flatten()
        }) {
            ids.entry(record.collection())
                .or_default()
                .insert(record.id().to_string());
        }
        ids
    }
}
