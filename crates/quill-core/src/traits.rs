//! Core traits for the quill storage abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CreateNoteRequest, Note, NoteDetail, UpdateNoteRequest};

/// Durable storage of notes — the system of record.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a new note owned by `owner_id`, returning the generated id.
    ///
    /// Fails with `Error::Invariant` when the store does not confirm the
    /// row was written.
    async fn insert(&self, req: CreateNoteRequest, owner_id: Uuid) -> Result<Uuid>;

    /// Fetch a single note joined with the owner's display name.
    async fn fetch(&self, id: Uuid) -> Result<NoteDetail>;

    /// Fetch a note row without the identity join (ownership checks).
    async fn fetch_meta(&self, id: Uuid) -> Result<Note>;

    /// List the union of notes owned by `user_id` and notes shared with
    /// `user_id`, deduplicated by note id.
    async fn list_visible(&self, user_id: Uuid) -> Result<Vec<Note>>;

    /// Replace title/body/tags and bump `updated_at_utc`.
    ///
    /// Returns the row's owner as reported by the store itself, so cache
    /// invalidation can never be aimed at a caller-supplied partition.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Uuid>;

    /// Delete the row, returning its former owner.
    async fn delete(&self, id: Uuid) -> Result<Uuid>;
}

/// Resolves which users have been granted access to a note.
///
/// Membership is owned elsewhere; this system only queries it.
#[async_trait]
pub trait CollaborationDirectory: Send + Sync {
    /// Whether `user_id` holds a grant for `note_id`.
    async fn is_collaborator(&self, note_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// All users holding a grant for `note_id`.
    async fn collaborators(&self, note_id: Uuid) -> Result<Vec<Uuid>>;
}
