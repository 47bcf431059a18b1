//! Axum route handler for PDF download.

use axum::{
    extract::{Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{export_file_name, export_pdf};
use crate::models::ResumeTemplate;
use crate::render::{render, render_with_template};
use crate::state::AppState;

const PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-page-count");

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub template: Option<ResumeTemplate>,
}

/// GET /api/v1/export?template=
///
/// Renders the current resume and returns it as an A4 PDF attachment named
/// after the candidate.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let resume = state.store.read().await.resume().clone();
    let fonts = state.fonts.clone();

    let artifact = tokio::task::spawn_blocking(move || {
        let document = match query.template {
            Some(template) => render_with_template(&resume, template),
            None => render(&resume),
        };
        let file_name = export_file_name(&resume.personal_info);
        export_pdf(&document, &file_name, fonts)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
        (PAGE_COUNT_HEADER, artifact.page_count.to_string()),
    ];
    Ok((headers, Bytes::from(artifact.bytes)).into_response())
}
