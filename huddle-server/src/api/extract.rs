use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use huddle_core::ValidationError;
use serde::de::DeserializeOwned;

use crate::error::ServerError;

/// `Json<T>` whose rejections come back in the usual error envelope
/// instead of axum's plain-text bodies.
pub(crate) struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ValidationError::Malformed {
                field: "body",
                reason: describe(&rejection),
            }
            .into()),
        }
    }
}

fn describe(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(e) => format!("invalid JSON payload: {e}"),
        JsonRejection::JsonSyntaxError(e) => format!("malformed JSON: {e}"),
        JsonRejection::MissingJsonContentType(_) => {
            "expected Content-Type: application/json".to_owned()
        }
        other => format!("request body error: {other}"),
    }
}
