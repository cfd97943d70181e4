//! Data models for notes and collaboration grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title applied when a create payload omits one.
pub const DEFAULT_NOTE_TITLE: &str = "untitled";

/// A note as stored and as cached in per-owner list entries.
///
/// `id` is immutable after creation and `owner_id` never changes;
/// `updated_at_utc` is always >= `created_at_utc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub owner_id: Uuid,
}

/// A single-note read, joined with the owner's display name.
///
/// Never served from cache: the join must reflect the current identity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDetail {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub owner_id: Uuid,
    pub username: Option<String>,
}

/// Request for creating a new note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateNoteRequest {
    /// Title to persist, falling back to the sentinel when absent.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_NOTE_TITLE)
    }
}

/// Request for replacing a note's title/body/tags.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A grant recording that `user_id` may read/write `note_id` despite not
/// owning it. Queried only; never created or destroyed by this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationGrant {
    pub note_id: Uuid,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_sentinel() {
        let req = CreateNoteRequest {
            title: None,
            body: "milk,eggs".to_string(),
            tags: vec![],
        };
        assert_eq!(req.title_or_default(), DEFAULT_NOTE_TITLE);

        let req = CreateNoteRequest {
            title: Some("Groceries".to_string()),
            body: "milk,eggs".to_string(),
            tags: vec![],
        };
        assert_eq!(req.title_or_default(), "Groceries");
    }

    #[test]
    fn test_note_json_keeps_iso8601_timestamps() {
        let now = Utc::now();
        let note = Note {
            id: Uuid::nil(),
            title: "t".into(),
            body: "b".into(),
            tags: vec!["a".into()],
            created_at_utc: now,
            updated_at_utc: now,
            owner_id: Uuid::nil(),
        };
        let json = serde_json::to_string(&note).unwrap();
        // chrono serializes RFC 3339 / ISO-8601
        assert!(json.contains(&now.format("%Y-%m-%dT").to_string()));
    }
}
