//! # quill-db
//!
//! PostgreSQL database layer for the quill note backend.
//!
//! This crate provides:
//! - Connection pool management
//! - `PgNoteStore`, the system of record for notes
//! - `PgCollaborationDirectory`, read-only membership lookups
//!
//! Schema management is external: the `note`, `collaboration`, and
//! `app_user` tables are assumed to exist.

pub mod collaborations;
pub mod notes;
pub mod pool;

// Re-export core types
pub use quill_core::*;

pub use collaborations::PgCollaborationDirectory;
pub use notes::PgNoteStore;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note store — the system of record.
    pub notes: PgNoteStore,
    /// Collaboration grant lookups.
    pub collaborations: PgCollaborationDirectory,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteStore::new(pool.clone()),
            collaborations: PgCollaborationDirectory::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
