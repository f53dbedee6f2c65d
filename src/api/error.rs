use crate::world::WorldError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::debug;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Request failures, mapped onto HTTP status codes
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    World(#[from] WorldError),

    /// Body is not JSON, or not the mapping shape the route expects
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("payload too large")]
    PayloadTooLarge,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::World(WorldError::UnknownListener(_)) => StatusCode::NOT_FOUND,
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        };

        debug!(status = status.as_u16(), error = %self, "Request rejected");

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
            _ => ApiError::MalformedInput(rejection.body_text()),
        }
    }
}
