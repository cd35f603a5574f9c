use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use huddle_core::{ErrorPayload, ServerEvent, ValidationError};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationFailed,
    StorageFailed,
    NotFound,
    Conflict,
    Unavailable,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::StorageFailed => "STORAGE_FAILED",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Unavailable => "UNAVAILABLE",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
            Self::StorageFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub const fn retryable(self) -> bool {
        matches!(self, Self::StorageFailed | Self::Unavailable)
    }
}

/// Everything a single request or event can fail with.
///
/// Always scoped to the request that caused it: the HTTP layer turns it into
/// a response, the WebSocket layer into an `error` event for the sender.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("presence hub is not running")]
    HubUnavailable,
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(what) => Self::Conflict(what),
            other => Self::Storage(other),
        }
    }
}

impl ServerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Storage(_) => ErrorCode::StorageFailed,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::HubUnavailable => ErrorCode::Unavailable,
        }
    }

    /// Error event for the connection whose event failed.
    pub fn to_event(&self) -> ServerEvent {
        ServerEvent::Error(ErrorPayload {
            code: self.code().as_str().to_owned(),
            message: self.to_string(),
        })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let code = self.code();
        (
            code.status(),
            Json(json!({
                "error": {
                    "code": code.as_str(),
                    "message": self.to_string(),
                    "retryable": code.retryable(),
                }
            })),
        )
            .into_response()
    }
}
