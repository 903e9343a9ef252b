use std::sync::Arc;

use crate::config::Config;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resume documents. Postgres in production, in-memory for tests and local runs.
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}
