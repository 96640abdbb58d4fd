//! API error types with JSON bodies the web client understands.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::config::SUPPORTED_CROPS;

pub const UNSUPPORTED_CROP_MESSAGE: &str =
    "This mini project is limited to Potato and Tomato. Other crops are future scope.";

/// Request-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields { required: &'static [&'static str] },
    #[error("Crop not supported in this educational version")]
    UnsupportedCrop,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Scheme not found")]
    SchemeNotFound(i64),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, body) = match &self {
            ApiError::MissingFields { required } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "required": required, "success": false }),
            ),
            ApiError::UnsupportedCrop => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": error,
                    "supportedCrops": SUPPORTED_CROPS,
                    "message": UNSUPPORTED_CROP_MESSAGE,
                    "success": false,
                }),
            ),
            ApiError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "success": false }),
            ),
            ApiError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": error,
                    "message": "The requested resource does not exist",
                    "status": 404,
                    "success": false,
                }),
            ),
            ApiError::SchemeNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({ "error": error, "schemeId": id, "success": false }),
            ),
            ApiError::Unexpected(detail) => {
                tracing::error!(detail, "Unexpected API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": error, "success": false }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
