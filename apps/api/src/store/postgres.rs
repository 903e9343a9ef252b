use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use crate::store::{DocumentPath, DocumentStore, FlatDocument, FlattenError, StoreError};

/// PostgreSQL-backed store. Each document is one row holding its flat body as
/// JSONB; partial updates merge with the `||` operator so untouched keys stay.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_document(path: &str, body: Value) -> Result<FlatDocument, StoreError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => {
            tracing::warn!("Document {path} has a non-object body");
            Err(StoreError::Malformed(FlattenError::NotAnObject))
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, path: &DocumentPath, body: FlatDocument) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (path, body)
            VALUES ($1, $2)
            ON CONFLICT (path) DO NOTHING
            "#,
        )
        .bind(path.as_str())
        .bind(Value::Object(body))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        debug!("Created document {path}");
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: FlatDocument) -> Result<(), StoreError> {
        let key_count = fields.len();
        let result = sqlx::query(
            "UPDATE documents SET body = body || $2, updated_at = now() WHERE path = $1",
        )
        .bind(path.as_str())
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(path.to_string()));
        }
        debug!("Merged {key_count} keys into {path}");
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<FlatDocument>, StoreError> {
        let body: Option<Value> = sqlx::query_scalar("SELECT body FROM documents WHERE path = $1")
            .bind(path.as_str())
            .fetch_optional(&self.pool)
            .await?;

        body.map(|b| into_document(path.as_str(), b)).transpose()
    }

    async fn list(
        &self,
        collection: &DocumentPath,
    ) -> Result<Vec<(DocumentPath, FlatDocument)>, StoreError> {
        let prefix = format!("{collection}/");
        let rows: Vec<(String, Value)> = sqlx::query_as(
            r#"
            SELECT path, body FROM documents
            WHERE left(path, length($1)) = $1
              AND position('/' IN substr(path, length($1) + 1)) = 0
            ORDER BY path
            "#,
        )
        .bind(&prefix)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(path, body)| {
                let document = into_document(&path, body)?;
                Ok((DocumentPath::from(path), document))
            })
            .collect()
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE path = $1")
            .bind(path.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
