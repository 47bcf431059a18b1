use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::import::ImportError;
use crate::store::draft::DraftError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Render capture failure: {0}")]
    RenderCaptureFailure(String),

    #[error("Export failure: {0}")]
    ExportFailure(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::UnsupportedFileType(media_type) => {
                AppError::UnsupportedFileType(media_type)
            }
            ImportError::ParseFailure(msg) => AppError::ParseFailure(msg),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::RenderCapture(msg) => AppError::RenderCaptureFailure(msg),
            ExportError::Export(msg) => AppError::ExportFailure(msg),
        }
    }
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::UnsupportedFileType(media_type) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE_TYPE",
                format!("Please upload a PDF or Word document (got '{media_type}')"),
            ),
            AppError::ParseFailure(msg) => {
                tracing::warn!("Import parse failure: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PARSE_FAILURE",
                    "Failed to process your resume. Please try again or start from scratch."
                        .to_string(),
                )
            }
            AppError::RenderCaptureFailure(msg) => {
                tracing::error!("Render capture failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_CAPTURE_FAILURE",
                    "Failed to generate PDF. Please try again.".to_string(),
                )
            }
            AppError::ExportFailure(msg) => {
                tracing::error!("Export failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILURE",
                    "Failed to generate PDF. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
