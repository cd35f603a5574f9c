//! Request/response surface: meetings, note history and lobby chat history.

mod extract;
mod meetings;
mod messages;
mod notes;

use axum::{
    Router,
    routing::{get, post},
};

use crate::app::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/meetings",
            get(meetings::list_meetings).post(meetings::create_meeting),
        )
        .route("/meetings/{code}", get(meetings::get_meeting))
        .route("/meetings/{code}/participants", get(meetings::participants))
        .route("/notes", post(notes::create_note))
        .route("/notes/{code}", get(notes::room_notes))
        .route("/messages", get(messages::list_messages))
}
