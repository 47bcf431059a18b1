//! Axum route handlers for resume upload.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::import::{import_document, DetectedFields, ImportedResume};
use crate::models::Resume;
use crate::state::AppState;
use crate::store::Action;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub resume: Resume,
    pub detected: DetectedFields,
    pub applied: bool,
}

/// POST /api/v1/import/preview
///
/// Parses the uploaded file and returns the partial resume without touching state.
pub async fn handle_import_preview(multipart: Multipart) -> Result<Json<ImportResponse>, AppError> {
    let imported = read_and_import(multipart).await?;
    Ok(Json(ImportResponse {
        resume: imported.resume,
        detected: imported.detected,
        applied: false,
    }))
}

/// POST /api/v1/import
///
/// Parses the uploaded file and replaces the current resume with the result
/// via `IMPORT_RESUME`.
pub async fn handle_import(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let imported = read_and_import(multipart).await?;

    let mut store = state.store.write().await;
    let resume = store
        .dispatch(Action::ImportResume(imported.resume))
        .await
        .clone();
    info!("Replaced current resume with imported resume {}", resume.id);

    Ok(Json(ImportResponse {
        resume,
        detected: imported.detected,
        applied: true,
    }))
}

/// Reads the `file` field. The declared content type is checked before the
/// field body is read.
async fn read_and_import(mut multipart: Multipart) -> Result<ImportedResume, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let media_type = field.content_type().unwrap_or_default().to_string();
        return import_document(&media_type, move || async move {
            field.bytes().await.map_err(upload_error)
        })
        .await;
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// Uploads over the body limit surface as 413; anything else is a malformed request.
fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart upload: {}", err.body_text()))
    }
}
