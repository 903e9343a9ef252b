use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool and makes sure the documents table exists.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            path       TEXT PRIMARY KEY,
            body       JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(&pool)
    .await
    .context("failed to create documents table")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
