use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub type ApiResult<T> = Result<T, ApiError>;

/// Request-processing failures.
///
/// `User` is the only way to produce a user-facing error: whoever detects the
/// condition picks the status code and a message that is safe to display.
/// Everything else ends up in `Internal` and is masked before it reaches the
/// client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    User { status: StatusCode, message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// JSON envelope used for every failure response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::User {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::User { status, message } => (status, message),
            ApiError::Internal(err) => {
                // Operator-side record; the caller only ever sees the generic body.
                tracing::error!(error = %err, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            status: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
