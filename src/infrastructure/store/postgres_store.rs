use crate::domain::{
    shared::collection::Collection,
    store::{errors::StoreError, repository::DocumentStore},
};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;

/// Document store backed by the `seed_documents` table (JSONB bodies keyed
/// by collection and id).
pub struct PostgresDocumentStore {
    pub pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Protocol(_) => StoreError::Unavailable(err.to_string()),
        sqlx::Error::Encode(_) | sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
            StoreError::Serialization(err.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self, document))]
    async fn put(
        &self,
        collection: Collection,
        id: &str,
        document: &Value,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO seed_documents (collection, id, body, written_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, written_at = NOW()
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        sqlx::query_scalar::<_, Value>(
            "SELECT body FROM seed_documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM seed_documents WHERE collection = $1",
        )
        .bind(collection.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        usize::try_from(count).map_err(|e| StoreError::Backend(e.to_string()))
    }
}
