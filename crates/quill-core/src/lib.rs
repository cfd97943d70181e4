//! # quill-core
//!
//! Core types, traits, and abstractions for the quill note backend.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the database and API crates depend on.

pub mod cache;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use cache::{owner_notes_key, CacheConsistency, CacheLookup, ListCache};
pub use error::{Error, Result};
pub use models::{
    CollaborationGrant, CreateNoteRequest, Note, NoteDetail, UpdateNoteRequest,
    DEFAULT_NOTE_TITLE,
};
pub use traits::{CollaborationDirectory, NoteStore};
