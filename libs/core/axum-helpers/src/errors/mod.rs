pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Error envelope returned for every failed request.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Resource not found",
///   "details": null
/// }
/// ```
///
/// `code` is the stable numeric identifier from [`ErrorCode`], `error` its
/// SCREAMING_SNAKE name, and `details` optional structured context such as
/// per-field validation errors.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Errors the HTTP layer knows how to render.
///
/// Domain errors convert into one of these variants; `IntoResponse` then
/// picks the status, the [`ErrorCode`] and the envelope body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::UuidError(_) => ErrorCode::InvalidUuid,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    /// Emits the log line for this error at a severity matching who caused it:
    /// client mistakes at info/warn, server faults at error.
    fn log(&self) {
        let code = self.code().code();
        match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code, "JSON extraction error: {:?}", e)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code, "Validation error: {:?}", e)
            }
            AppError::UuidError(e) => {
                tracing::warn!(error_code = code, "UUID error: {:?}", e)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code, "Bad request: {}", msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code, "Not found: {}", msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code, "Internal server error: {}", msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let code = self.code();

        let (status, message, details) = match self {
            AppError::JsonExtractorRejection(e) => (e.status(), e.body_text(), None),
            AppError::ValidationError(e) => (
                StatusCode::BAD_REQUEST,
                code.default_message().to_string(),
                Some(serde_json::to_value(&e).unwrap_or(serde_json::json!(null))),
            ),
            AppError::UuidError(_) => (
                StatusCode::BAD_REQUEST,
                code.default_message().to_string(),
                None,
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Builds an envelope response outside the `AppError` conversion path,
/// e.g. for the router's 404 fallback.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
