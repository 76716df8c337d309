//! # Database Persistence Layer
//!
//! PostgreSQL access for the certificate store via SQLx.
//!
//! ## Connection lifecycle
//!
//! [`LazyPool`] owns the connection pool. Nothing connects at startup: the
//! first query establishes the pool and applies the embedded migrations,
//! and every later query reuses it. If establishment fails the cell stays
//! empty and the next request tries again. The handle is created once in
//! `main.rs` and reaches handlers through `AppState`.

pub mod certificates;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::sync::OnceCell;

/// Errors from the certificate store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connecting to the database or applying migrations failed.
    #[error("failed to establish database connection: {0}")]
    Connect(#[source] sqlx::Error),

    /// Migrations could not be applied.
    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A query failed.
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// The query input was rejected before reaching the store.
    #[error("invalid query: {0}")]
    Invalid(#[from] certview_core::ValidationError),
}

/// A lazily established, shared PostgreSQL pool.
#[derive(Debug)]
pub struct LazyPool {
    url: String,
    max_connections: u32,
    pool: OnceCell<PgPool>,
}

impl LazyPool {
    /// Create the handle without connecting.
    pub fn new(url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            pool: OnceCell::new(),
        }
    }

    /// The pool, connecting and migrating on first use.
    pub async fn get(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect(&self.url)
                    .await
                    .map_err(StoreError::Connect)?;
                tracing::info!("Connected to PostgreSQL");

                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database migrations applied");

                Ok(pool)
            })
            .await
    }

    /// Whether the pool has been established yet.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Run a trivial query to confirm the database is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.get().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
