use super::errors::StoreError;
use crate::domain::shared::collection::Collection;
use async_trait::async_trait;
use serde_json::Value;

/// Document store addressed by (collection, id).
///
/// `put` must be idempotent and last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, collection: Collection, id: &str, document: &Value)
    -> Result<(), StoreError>;
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError>;
    async fn count(&self, collection: Collection) -> Result<usize, StoreError>;
}
