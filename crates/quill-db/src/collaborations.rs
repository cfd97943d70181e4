//! Collaboration grant lookups.
//!
//! Grants are owned and written by the collaboration service; this side
//! only asks two questions of them.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use quill_core::{CollaborationDirectory, Error, Result};

/// PostgreSQL implementation of CollaborationDirectory.
pub struct PgCollaborationDirectory {
    pool: Pool<Postgres>,
}

impl PgCollaborationDirectory {
    /// Create a new PgCollaborationDirectory with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollaborationDirectory for PgCollaborationDirectory {
    async fn is_collaborator(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        let row = sqlx::query(
            "SELECT 1 AS present
             FROM collaboration
             WHERE note_id = $1 AND user_id = $2",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.is_some())
    }

    async fn collaborators(&self, note_id: Uuid) -> Result<Vec<Uuid>> {
        let rows = sqlx::query(
            "SELECT user_id
             FROM collaboration
             WHERE note_id = $1",
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(|r| r.get("user_id")).collect())
    }
}
