//! Note access control.
//!
//! A pure authorization predicate evaluated per call against current store
//! and directory state. Decisions are never cached — a grant can appear or
//! disappear between calls.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use quill_core::{CollaborationDirectory, Error, NoteStore, Result};

/// Decides, for a given (note, user), whether the caller may act on the note.
#[derive(Clone)]
pub struct NoteAccessController {
    store: Arc<dyn NoteStore>,
    directory: Arc<dyn CollaborationDirectory>,
}

impl NoteAccessController {
    pub fn new(store: Arc<dyn NoteStore>, directory: Arc<dyn CollaborationDirectory>) -> Self {
        Self { store, directory }
    }

    /// Succeeds only when `user_id` owns the note.
    ///
    /// Fails with `NoteNotFound` when the note does not exist and
    /// `Forbidden` when it is owned by someone else.
    pub async fn verify_ownership(&self, note_id: Uuid, user_id: Uuid) -> Result<()> {
        let note = self.store.fetch_meta(note_id).await?;
        if note.owner_id != user_id {
            debug!(
                subsystem = "notes",
                component = "access",
                op = "verify_ownership",
                note_id = %note_id,
                user_id = %user_id,
                "Ownership check refused"
            );
            return Err(Error::Forbidden(
                "caller does not own this note".to_string(),
            ));
        }
        Ok(())
    }

    /// Succeeds when `user_id` owns the note or holds a collaboration grant.
    ///
    /// `NoteNotFound` is the only failure surfaced from beneath the
    /// ownership probe; any other refusal falls through to the grant set,
    /// and denial is issued only after that consultation.
    pub async fn verify_access(&self, note_id: Uuid, user_id: Uuid) -> Result<()> {
        match self.verify_ownership(note_id, user_id).await {
            Ok(()) => Ok(()),
            Err(Error::NoteNotFound(id)) => Err(Error::NoteNotFound(id)),
            Err(_) => {
                if self.directory.is_collaborator(note_id, user_id).await? {
                    debug!(
                        subsystem = "notes",
                        component = "access",
                        op = "verify_access",
                        note_id = %note_id,
                        user_id = %user_id,
                        "Access granted via collaboration"
                    );
                    Ok(())
                } else {
                    Err(Error::Forbidden(
                        "note is not shared with this user".to_string(),
                    ))
                }
            }
        }
    }
}
