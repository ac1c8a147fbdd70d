use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::errors::CoreError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Core(CoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Core(err) => match err {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
                CoreError::NothingToUndo => {
                    (StatusCode::CONFLICT, "nothing to undo".to_string())
                }
                CoreError::NothingToRedo => {
                    (StatusCode::CONFLICT, "nothing to redo".to_string())
                }
                CoreError::PlayerUnavailable(msg) => (
                    StatusCode::CONFLICT,
                    format!("player unavailable: {msg}"),
                ),
                CoreError::Storage(msg) => {
                    tracing::error!("storage error: {}", msg);
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
                }
                CoreError::Timeout => {
                    (StatusCode::GATEWAY_TIMEOUT, "request timed out".to_string())
                }
            },
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
