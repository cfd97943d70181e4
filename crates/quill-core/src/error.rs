//! Error types for the quill note backend.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using quill's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for quill operations.
///
/// `NoteNotFound`, `Forbidden`, and `Invariant` propagate unchanged to the
/// boundary layer for deterministic status mapping; everything else is
/// treated as an opaque server-side failure there.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    /// Caller lacks the required relationship to the note
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The store accepted a write but did not return the expected confirmation
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
