//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sora_core::MediaError;
use tracing::error;

use crate::services::auth::AuthError;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// The request was rejected by the authenticator.
    Auth(AuthError),
    /// The media API failed or answered with garbage.
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Auth(err) => return err.into_response(),
            AppError::Upstream(msg) => {
                error!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
