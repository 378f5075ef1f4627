//! Seed files in JSON.
//!
//! The top level maps collection names to their documents, either as a list
//! or as an object keyed by document id:
//!
//! ```json
//! {
//!   "cities": { "paris": { "id": "paris", "name": "Paris" } },
//!   "attractions": [ { "id": "eiffel-tower", "cityId": "paris" } ]
//! }
//! ```
//!
//! Collections and keyed documents keep their file order, and a key repeated
//! within a collection yields one entry per occurrence.
//!
//! Collection names are not checked here; unknown ones are passed through so
//! the loader can report them next to the other rejected records.

use crate::application::seed_catalog::dto::SeedEntry;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unexpected seed file layout: {0}")]
    Layout(String),
}

#[instrument]
pub async fn read_seed_file(path: &Path) -> Result<Vec<SeedEntry>, SourceError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let entries = parse_seed_json(&raw)?;
    debug!(entries = entries.len(), "Seed file parsed");
    Ok(entries)
}

pub fn parse_seed_json(raw: &str) -> Result<Vec<SeedEntry>, SourceError> {
    let SeedFile(collections) = serde_json::from_str(raw).map_err(|e| {
        if e.is_data() {
            SourceError::Layout(e.to_string())
        } else {
            SourceError::Parse(e)
        }
    })?;

    let mut entries = Vec::new();
    for (collection, documents) in collections {
        match documents {
            Documents::Listed(items) => {
                entries.extend(
                    items
                        .into_iter()
                        .map(|document| SeedEntry::new(collection.clone(), document)),
                );
            }
            Documents::Keyed(keyed) => {
                entries.extend(keyed.into_iter().map(|(key, document)| {
                    SeedEntry::keyed(collection.clone(), key, document)
                }));
            }
        }
    }
    Ok(entries)
}

/// Collections in file order. Repeated collection names and repeated document
/// keys are kept as separate entries so the loader can report them.
struct SeedFile(Vec<(String, Documents)>);

enum Documents {
    Listed(Vec<Value>),
    Keyed(Vec<(String, Value)>),
}

impl<'de> Deserialize<'de> for SeedFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeedFileVisitor;

        impl<'de> de::Visitor<'de> for SeedFileVisitor {
            type Value = SeedFile;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of collections")
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<SeedFile, A::Error> {
                let mut collections = Vec::new();
                while let Some(entry) = map.next_entry::<String, Documents>()? {
                    collections.push(entry);
                }
                Ok(SeedFile(collections))
            }
        }

        deserializer.deserialize_map(SeedFileVisitor)
    }
}

impl<'de> Deserialize<'de> for Documents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentsVisitor;

        impl<'de> de::Visitor<'de> for DocumentsVisitor {
            type Value = Documents;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a list or an object of documents")
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Documents, A::Error> {
                let mut items = Vec::new();
                while let Some(document) = seq.next_element::<Value>()? {
                    items.push(document);
                }
                Ok(Documents::Listed(items))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Documents, A::Error> {
                let mut keyed = Vec::new();
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    keyed.push(entry);
                }
                Ok(Documents::Keyed(keyed))
            }
        }

        deserializer.deserialize_any(DocumentsVisitor)
    }
}
