mod auth;
mod config;
mod db;
mod edit;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod store;
mod templates;
mod wizard;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeItNow v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            Arc::new(PgDocumentStore::new(
                create_pool(url, config.db_max_connections).await?,
            ))
        }
        StoreBackend::Memory => {
            info!("Using in-memory document store; data is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };
    info!(
        "Default template for new resumes: {}",
        config.default_template.display_name()
    );

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
