//! Note CRUD with read-through list caching.
//!
//! The store is the source of truth; the cache holds a derived copy of each
//! owner's note list under `notes:{owner}`. Persistence is always confirmed
//! before any cache entry is touched — a write that fails leaves the cache
//! exactly as it was.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};
use uuid::Uuid;

use quill_core::{
    owner_notes_key, CacheConsistency, CacheLookup, CollaborationDirectory, CreateNoteRequest,
    ListCache, Note, NoteDetail, NoteStore, Result, UpdateNoteRequest,
};

/// Orchestrates reads and writes across the note store and the list cache.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    directory: Arc<dyn CollaborationDirectory>,
    cache: Arc<dyn ListCache>,
    consistency: CacheConsistency,
}

impl NoteService {
    pub fn new(
        store: Arc<dyn NoteStore>,
        directory: Arc<dyn CollaborationDirectory>,
        cache: Arc<dyn ListCache>,
        consistency: CacheConsistency,
    ) -> Self {
        Self {
            store,
            directory,
            cache,
            consistency,
        }
    }

    /// Persist a new note and invalidate the owner's list entry.
    pub async fn create_note(&self, req: CreateNoteRequest, owner_id: Uuid) -> Result<Uuid> {
        let note_id = self.store.insert(req, owner_id).await?;

        self.invalidate(owner_id, &[]).await;

        debug!(
            subsystem = "notes",
            component = "service",
            op = "create_note",
            note_id = %note_id,
            owner_id = %owner_id,
            "Note created"
        );
        Ok(note_id)
    }

    /// List every note visible to `user_id`, served read-through.
    ///
    /// A cache hit bypasses the store entirely — including any grant change
    /// since the entry was populated, a staleness window bounded by the next
    /// mutation. Miss, unavailable backend, and an undeserializable entry
    /// all take the same store-fallback-then-repopulate path.
    pub async fn list_notes(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let start = Instant::now();
        let key = owner_notes_key(user_id);

        match self.cache.get(&key).await {
            CacheLookup::Hit(payload) => match serde_json::from_str::<Vec<Note>>(&payload) {
                Ok(notes) => {
                    debug!(
                        subsystem = "notes",
                        component = "service",
                        op = "list_notes",
                        user_id = %user_id,
                        cache_result = "hit",
                        result_count = notes.len(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Served note list from cache"
                    );
                    return Ok(notes);
                }
                Err(e) => {
                    warn!(
                        subsystem = "notes",
                        component = "service",
                        op = "list_notes",
                        user_id = %user_id,
                        cache_result = "corrupt",
                        error = %e,
                        "Cached note list failed to deserialize, reading store"
                    );
                }
            },
            CacheLookup::Miss => {
                debug!(
                    subsystem = "notes",
                    component = "service",
                    op = "list_notes",
                    user_id = %user_id,
                    cache_result = "miss",
                    "Note list not cached, reading store"
                );
            }
            CacheLookup::Unavailable => {
                warn!(
                    subsystem = "notes",
                    component = "service",
                    op = "list_notes",
                    user_id = %user_id,
                    cache_result = "unavailable",
                    "Cache unavailable, reading store"
                );
            }
        }

        let notes = self.store.list_visible(user_id).await?;

        match serde_json::to_string(&notes) {
            Ok(payload) => {
                self.cache.set(&key, &payload).await;
            }
            Err(e) => {
                warn!(
                    subsystem = "notes",
                    component = "service",
                    op = "list_notes",
                    user_id = %user_id,
                    error = %e,
                    "Note list could not be serialized for caching"
                );
            }
        }

        debug!(
            subsystem = "notes",
            component = "service",
            op = "list_notes",
            user_id = %user_id,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note list read from store"
        );
        Ok(notes)
    }

    /// Fetch a single note with the owner's display name.
    ///
    /// Always a direct store read; access is checked at the call site.
    pub async fn get_note(&self, note_id: Uuid) -> Result<NoteDetail> {
        self.store.fetch(note_id).await
    }

    /// Replace a note's title/body/tags and invalidate the owner's entry.
    pub async fn edit_note(&self, note_id: Uuid, req: UpdateNoteRequest) -> Result<()> {
        let extra = self.strict_targets(note_id).await?;
        let owner_id = self.store.update(note_id, req).await?;

        self.invalidate(owner_id, &extra).await;

        debug!(
            subsystem = "notes",
            component = "service",
            op = "edit_note",
            note_id = %note_id,
            owner_id = %owner_id,
            "Note updated"
        );
        Ok(())
    }

    /// Delete a note and invalidate its former owner's entry.
    pub async fn delete_note(&self, note_id: Uuid) -> Result<()> {
        let extra = self.strict_targets(note_id).await?;
        let owner_id = self.store.delete(note_id).await?;

        self.invalidate(owner_id, &extra).await;

        debug!(
            subsystem = "notes",
            component = "service",
            op = "delete_note",
            note_id = %note_id,
            owner_id = %owner_id,
            "Note deleted"
        );
        Ok(())
    }

    /// Collaborator partitions to invalidate alongside the owner's.
    ///
    /// Read before the mutation so a delete cannot erase the grant rows
    /// first. Empty under eventual consistency.
    async fn strict_targets(&self, note_id: Uuid) -> Result<Vec<Uuid>> {
        match self.consistency {
            CacheConsistency::Eventual => Ok(Vec::new()),
            CacheConsistency::Strict => self.directory.collaborators(note_id).await,
        }
    }

    /// Drop list entries after a confirmed write. Failures stay in the logs;
    /// an entry that survives is bounded by the backend's TTL.
    async fn invalidate(&self, owner_id: Uuid, collaborators: &[Uuid]) {
        self.cache.delete(&owner_notes_key(owner_id)).await;
        for user_id in collaborators {
            self.cache.delete(&owner_notes_key(*user_id)).await;
        }
    }
}
