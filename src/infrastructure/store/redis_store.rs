use crate::domain::{
    shared::collection::Collection,
    store::{errors::StoreError, repository::DocumentStore},
};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::MultiplexedConnection};
use serde_json::Value;
use std::time::Duration;

/// Connection attempts give up after this long.
const CONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Document store on plain Redis keys.
///
/// Each document lives at `<prefix>:<collection>:<id>` as a JSON string, and
/// `<prefix>:<collection>:ids` is a set of the ids written, used for counts.
pub struct RedisDocumentStore {
    client: Client,
    prefix: String,
}

impl RedisDocumentStore {
    pub fn new(client: Client, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    fn document_key(&self, collection: Collection, id: &str) -> String {
        format!("{}:{}:{}", self.prefix, collection, id)
    }

    fn index_key(&self, collection: Collection) -> String {
        format!("{}:{}:ids", self.prefix, collection)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        tokio::time::timeout(
            Duration::from_secs(CONNECT_TIMEOUT_SECONDS),
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| StoreError::Unavailable("Redis connection timed out".into()))?
        .map_err(store_error)
    }
}

fn store_error(err: RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Backend(err.to_string())
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn put(
        &self,
        collection: Collection,
        id: &str,
        document: &Value,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(document)?;
        let mut conn = self.connection().await?;
        let _: () = conn
            .set(self.document_key(collection, id), json)
            .await
            .map_err(store_error)?;
        let _: usize = conn
            .sadd(self.index_key(collection), id)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(self.document_key(collection, id))
            .await
            .map_err(store_error)?;
        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        let mut conn = self.connection().await?;
        conn.scard(self.index_key(collection))
            .await
            .map_err(store_error)
    }
}
