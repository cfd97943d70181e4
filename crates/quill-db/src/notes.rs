//! Note store implementation (system of record).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use quill_core::{
    CreateNoteRequest, Error, Note, NoteDetail, NoteStore, Result, UpdateNoteRequest,
};

/// PostgreSQL implementation of NoteStore.
pub struct PgNoteStore {
    pool: Pool<Postgres>,
}

impl PgNoteStore {
    /// Create a new PgNoteStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_note(row: &PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        tags: row.get("tags"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
        owner_id: row.get("owner_id"),
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn insert(&self, req: CreateNoteRequest, owner_id: Uuid) -> Result<Uuid> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        let row = sqlx::query(
            "INSERT INTO note (id, title, body, tags, created_at_utc, updated_at_utc, owner_id)
             VALUES ($1, $2, $3, $4, $5, $5, $6)
             RETURNING id",
        )
        .bind(id)
        .bind(req.title_or_default())
        .bind(&req.body)
        .bind(&req.tags)
        .bind(now)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        // The store must confirm the write; a silent insert is a fault.
        let confirmed: Option<Uuid> = row.map(|r| r.get("id"));
        match confirmed {
            Some(returned) => Ok(returned),
            None => Err(Error::Invariant("note insert returned no id".to_string())),
        }
    }

    async fn fetch(&self, id: Uuid) -> Result<NoteDetail> {
        let row = sqlx::query(
            "SELECT n.id, n.title, n.body, n.tags,
                    n.created_at_utc, n.updated_at_utc, n.owner_id,
                    u.username
             FROM note n
             LEFT JOIN app_user u ON u.id = n.owner_id
             WHERE n.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        Ok(NoteDetail {
            id: row.get("id"),
            title: row.get("title"),
            body: row.get("body"),
            tags: row.get("tags"),
            created_at_utc: row.get("created_at_utc"),
            updated_at_utc: row.get("updated_at_utc"),
            owner_id: row.get("owner_id"),
            username: row.get("username"),
        })
    }

    async fn fetch_meta(&self, id: Uuid) -> Result<Note> {
        let row = sqlx::query(
            "SELECT id, title, body, tags, created_at_utc, updated_at_utc, owner_id
             FROM note
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        Ok(map_row_to_note(&row))
    }

    async fn list_visible(&self, user_id: Uuid) -> Result<Vec<Note>> {
        // Union of owned notes and notes shared via collaboration grants,
        // deduplicated by note id.
        let rows = sqlx::query(
            "SELECT n.id, n.title, n.body, n.tags,
                    n.created_at_utc, n.updated_at_utc, n.owner_id
             FROM note n
             LEFT JOIN collaboration c ON c.note_id = n.id
             WHERE n.owner_id = $1 OR c.user_id = $1
             GROUP BY n.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(map_row_to_note).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Uuid> {
        let now = Utc::now();

        // RETURNING owner_id: invalidation is aimed at the row's actual
        // owner, never a caller-supplied value.
        let row = sqlx::query(
            "UPDATE note
             SET title = $1, body = $2, tags = $3, updated_at_utc = $4
             WHERE id = $5
             RETURNING id, owner_id",
        )
        .bind(&req.title)
        .bind(&req.body)
        .bind(&req.tags)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        Ok(row.get("owner_id"))
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid> {
        let row = sqlx::query(
            "DELETE FROM note
             WHERE id = $1
             RETURNING id, owner_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        Ok(row.get("owner_id"))
    }
}
