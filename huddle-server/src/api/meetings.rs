use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use huddle_core::{Meeting, NewMeeting, Occupant, RoomCode};
use tracing::info;

use super::extract::ApiJson;
use crate::app::AppState;
use crate::error::ServerError;

pub(crate) async fn create_meeting(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewMeeting>,
) -> Result<(StatusCode, Json<Meeting>), ServerError> {
    let meeting = body.into_meeting(Utc::now())?;
    let meeting = state.store.save_meeting(meeting).await?;
    info!("Created meeting {} ({})", meeting.code, meeting.title);
    Ok((StatusCode::CREATED, Json(meeting)))
}

pub(crate) async fn list_meetings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Meeting>>, ServerError> {
    Ok(Json(state.store.list_meetings().await?))
}

pub(crate) async fn get_meeting(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Meeting>, ServerError> {
    let code = RoomCode(code);
    state
        .store
        .find_meeting(&code)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("meeting {code}")))
}

/// Who is connected to the room right now.
pub(crate) async fn participants(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<Occupant>>, ServerError> {
    Ok(Json(state.hub.occupants(RoomCode(code)).await?))
}
