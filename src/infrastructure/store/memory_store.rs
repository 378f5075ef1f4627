use crate::domain::{
    shared::collection::Collection,
    store::{errors::StoreError, repository::DocumentStore},
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local document store. Contents live as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RwLock<HashMap<Collection, HashMap<String, Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn put(
        &self,
        collection: Collection,
        id: &str,
        document: &Value,
    ) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.to_string(), document.clone());
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .documents
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        Ok(self
            .documents
            .read()
            .await
            .get(&collection)
            .map_or(0, HashMap::len))
    }
}
