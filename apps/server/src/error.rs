use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clipsynth_core::ClipSynthError;
use tracing::error;

/// API error taxonomy. Validation problems carry their message to the
/// client; upstream and internal failures are logged with full detail and
/// answered with a generic message so nothing internal leaks.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(ClipSynthError),
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<ClipSynthError> for ApiError {
    fn from(err: ClipSynthError) -> Self {
        match err {
            ClipSynthError::InvalidUrl { .. } => ApiError::BadRequest(err.to_string()),
            other => ApiError::Upstream(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(err) => {
                error!(%err, "upstream failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process video".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                error!(%detail, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
