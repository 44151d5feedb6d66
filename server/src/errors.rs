use aggregator::ClientError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{FilterError, ValidationError};
use serde_json::json;
use thiserror::Error;

/// Error type for the session API.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid upload: {0}")]
    Upload(#[from] MultipartError),

    #[error("Invalid filters: {0}")]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Upload(_) => (StatusCode::BAD_REQUEST, "UPLOAD_ERROR"),
            AppError::Filter(_) => (StatusCode::BAD_REQUEST, "FILTER_ERROR"),
            AppError::Upstream(ClientError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Upstream(ClientError::NoExtraction) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_EXTRACTION")
            }
            AppError::Upstream(ClientError::NoReviews) => (StatusCode::NOT_FOUND, "NO_REVIEWS"),
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
