use axum::{Json, extract::State};
use huddle_core::ChatMessage;

use crate::app::AppState;
use crate::error::ServerError;

pub(crate) async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatMessage>>, ServerError> {
    Ok(Json(state.lobby.history().await?))
}
