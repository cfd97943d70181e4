//! Shared application state.

use crate::services::{NoteAccessController, NoteService};

/// State handed to every handler. Both services are cheap to clone —
/// they hold `Arc`s over the store, directory, and cache.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub access: NoteAccessController,
}
