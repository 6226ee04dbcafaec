use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use fooddiary_core::DiaryError;

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Failure of an API request, rendered as `{error, message}`
#[derive(Debug)]
pub enum ApiError {
    Diary(DiaryError),
    /// Malformed request (path, query, header or body)
    BadRequest(String),
}

impl From<DiaryError> for ApiError {
    fn from(err: DiaryError) -> Self {
        ApiError::Diary(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "bad_request", message.clone())
            }
            ApiError::Diary(err) => match err {
                DiaryError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "validation_error", err.to_string())
                }
                DiaryError::InvalidRange { .. } | DiaryError::RangeTooLong { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_range", err.to_string())
                }
                DiaryError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
                DiaryError::Transport(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "Failed to access the food diary".to_string(),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(%message, "request rejected");
        }
        (status, Json(ErrorBody { error, message })).into_response()
    }
}
