use anyhow::{bail, Context, Result};

use crate::templates::TemplateId;

/// Which `DocumentStore` backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Required when `store_backend` is Postgres.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Template stored on new resumes that don't name one.
    pub default_template: TemplateId,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = match optional_env("DOCUMENT_STORE").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("DOCUMENT_STORE must be 'postgres' or 'memory', got '{other}'"),
        };
        let database_url = match store_backend {
            StoreBackend::Postgres => Some(require_env("DATABASE_URL")?),
            StoreBackend::Memory => optional_env("DATABASE_URL"),
        };

        Ok(Config {
            store_backend,
            database_url,
            db_max_connections: optional_env("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            default_template: TemplateId::or_keep(
                optional_env("DEFAULT_TEMPLATE").as_deref(),
                TemplateId::default(),
            ),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// In-memory store with defaults; used by tests and local runs.
    pub fn in_memory() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 10,
            default_template: TemplateId::default(),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
