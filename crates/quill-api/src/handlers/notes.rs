//! Note routes.
//!
//! The access controller is consulted before the repository on every
//! privileged read and mutation; the repository never serves data that
//! bypasses that decision on the calling path.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use quill_core::{CreateNoteRequest, UpdateNoteRequest};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note_id = state.notes.create_note(req, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "note_id": note_id })),
    ))
}

/// GET /notes
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.notes.list_notes(user_id).await?;

    Ok(Json(serde_json::json!({
        "notes": notes,
        "total": notes.len(),
    })))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.verify_access(id, user_id).await?;
    let note = state.notes.get_note(id).await?;

    Ok(Json(serde_json::json!({ "note": note })))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.verify_access(id, user_id).await?;
    state.notes.edit_note(id, req).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /notes/{id}
///
/// Owner-only: collaborators may read and edit a shared note, never
/// delete it.
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.verify_ownership(id, user_id).await?;
    state.notes.delete_note(id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
