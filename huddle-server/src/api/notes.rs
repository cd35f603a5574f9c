use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use huddle_core::{Note, NoteRequest, RoomCode};

use super::extract::ApiJson;
use crate::app::AppState;
use crate::error::ServerError;

/// Same path as a `note` event: persisted first, then pushed to the room.
pub(crate) async fn create_note(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ServerError> {
    let note = state.notes.publish(body.validate()?).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub(crate) async fn room_notes(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<Note>>, ServerError> {
    Ok(Json(state.notes.history(&RoomCode(code)).await?))
}
