//! In-memory doubles for the note store, collaboration directory, and list
//! cache, so the service core can be exercised without Postgres or Redis.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quill_api::services::{NoteAccessController, NoteService};
use quill_core::{
    CacheConsistency, CacheLookup, CollaborationDirectory, CreateNoteRequest, Error, ListCache,
    Note, NoteDetail, NoteStore, Result, UpdateNoteRequest,
};

// ============================================================================
// NOTE STORE
// ============================================================================

pub struct MemoryNoteStore {
    notes: Mutex<HashMap<Uuid, Note>>,
    usernames: Mutex<HashMap<Uuid, String>>,
    directory: Arc<MemoryDirectory>,
    confirm_writes: AtomicBool,
}

impl MemoryNoteStore {
    pub fn new(directory: Arc<MemoryDirectory>) -> Self {
        Self {
            notes: Mutex::new(HashMap::new()),
            usernames: Mutex::new(HashMap::new()),
            directory,
            confirm_writes: AtomicBool::new(true),
        }
    }

    /// Make subsequent inserts report no confirmation from the store.
    pub fn refuse_write_confirmation(&self) {
        self.confirm_writes.store(false, Ordering::SeqCst);
    }

    pub fn set_username(&self, user_id: Uuid, name: &str) {
        self.usernames
            .lock()
            .unwrap()
            .insert(user_id, name.to_string());
    }

    /// Write a row directly, bypassing the service (and its invalidation).
    pub fn insert_direct(&self, note: Note) {
        self.notes.lock().unwrap().insert(note.id, note);
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn insert(&self, req: CreateNoteRequest, owner_id: Uuid) -> Result<Uuid> {
        if !self.confirm_writes.load(Ordering::SeqCst) {
            return Err(Error::Invariant("note insert returned no id".to_string()));
        }

        let id = Uuid::now_v7();
        let now = Utc::now();
        let note = Note {
            id,
            title: req.title_or_default().to_string(),
            body: req.body,
            tags: req.tags,
            created_at_utc: now,
            updated_at_utc: now,
            owner_id,
        };
        self.notes.lock().unwrap().insert(id, note);
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<NoteDetail> {
        let note = self
            .notes
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))?;
        let username = self.usernames.lock().unwrap().get(&note.owner_id).cloned();

        Ok(NoteDetail {
            id: note.id,
            title: note.title,
            body: note.body,
            tags: note.tags,
            created_at_utc: note.created_at_utc,
            updated_at_utc: note.updated_at_utc,
            owner_id: note.owner_id,
            username,
        })
    }

    async fn fetch_meta(&self, id: Uuid) -> Result<Note> {
        self.notes
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn list_visible(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let notes = self.notes.lock().unwrap();
        let mut visible: Vec<Note> = notes
            .values()
            .filter(|n| n.owner_id == user_id || self.directory.has_grant(n.id, user_id))
            .cloned()
            .collect();
        visible.sort_by_key(|n| n.id);
        Ok(visible)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Uuid> {
        let mut notes = self.notes.lock().unwrap();
        let note = notes.get_mut(&id).ok_or(Error::NoteNotFound(id))?;
        note.title = req.title;
        note.body = req.body;
        note.tags = req.tags;
        note.updated_at_utc = Utc::now();
        Ok(note.owner_id)
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid> {
        let note = self
            .notes
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or(Error::NoteNotFound(id))?;
        Ok(note.owner_id)
    }
}

// ============================================================================
// COLLABORATION DIRECTORY
// ============================================================================

#[derive(Default)]
pub struct MemoryDirectory {
    grants: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, note_id: Uuid, user_id: Uuid) {
        self.grants.lock().unwrap().insert((note_id, user_id));
    }

    pub fn revoke(&self, note_id: Uuid, user_id: Uuid) {
        self.grants.lock().unwrap().remove(&(note_id, user_id));
    }

    pub fn has_grant(&self, note_id: Uuid, user_id: Uuid) -> bool {
        self.grants.lock().unwrap().contains(&(note_id, user_id))
    }
}

#[async_trait]
impl CollaborationDirectory for MemoryDirectory {
    async fn is_collaborator(&self, note_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.has_grant(note_id, user_id))
    }

    async fn collaborators(&self, note_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| *n == note_id)
            .map(|(_, u)| *u)
            .collect())
    }
}

// ============================================================================
// LIST CACHE
// ============================================================================

pub struct MemoryListCache {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl MemoryListCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Plant a raw value at a key, bypassing the service.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Inspect a key without going through the lookup path.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ListCache for MemoryListCache {
    async fn get(&self, key: &str) -> CacheLookup {
        if !self.available.load(Ordering::SeqCst) {
            return CacheLookup::Unavailable;
        }
        match self.entries.lock().unwrap().get(key) {
            Some(value) => CacheLookup::Hit(value.clone()),
            None => CacheLookup::Miss,
        }
    }

    async fn set(&self, key: &str, value: &str) -> bool {
        if !self.available.load(Ordering::SeqCst) {
            return false;
        }
        self.put_raw(key, value);
        true
    }

    async fn delete(&self, key: &str) -> bool {
        if !self.available.load(Ordering::SeqCst) {
            return false;
        }
        self.entries.lock().unwrap().remove(key);
        true
    }
}

// ============================================================================
// HARNESS
// ============================================================================

pub struct Harness {
    pub store: Arc<MemoryNoteStore>,
    pub directory: Arc<MemoryDirectory>,
    pub cache: Arc<MemoryListCache>,
    pub service: NoteService,
    pub access: NoteAccessController,
}

pub fn harness(consistency: CacheConsistency) -> Harness {
    let directory = Arc::new(MemoryDirectory::new());
    let store = Arc::new(MemoryNoteStore::new(directory.clone()));
    let cache = Arc::new(MemoryListCache::new());

    let service = NoteService::new(
        store.clone(),
        directory.clone(),
        cache.clone(),
        consistency,
    );
    let access = NoteAccessController::new(store.clone(), directory.clone());

    Harness {
        store,
        directory,
        cache,
        service,
        access,
    }
}

pub fn note_req(title: Option<&str>, body: &str, tags: &[&str]) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.map(String::from),
        body: body.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn update_req(title: &str, body: &str, tags: &[&str]) -> UpdateNoteRequest {
    UpdateNoteRequest {
        title: title.to_string(),
        body: body.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
