//! Axum route handler for the live preview.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ResumeTemplate;
use crate::render::{render, render_with_template};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Overrides the resume's own template for this request only.
    pub template: Option<ResumeTemplate>,
    /// On-screen zoom; geometry is unchanged.
    pub scale: Option<f32>,
}

/// GET /api/v1/preview?template=&scale=
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    if let Some(scale) = query.scale {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AppError::Validation(format!(
                "scale must be a positive number (got {scale})"
            )));
        }
    }

    // Render from a snapshot; the lock is released before layout starts.
    let resume = state.store.read().await.resume().clone();

    let svg = tokio::task::spawn_blocking(move || {
        let mut document = match query.template {
            Some(template) => render_with_template(&resume, template),
            None => render(&resume),
        };
        if let Some(scale) = query.scale {
            document = document.with_view_scale(scale);
        }
        let svg = document.to_svg();
        tracing::debug!(
            "Rendered {} preview at scale {:?} ({} bytes)",
            document.template.as_str(),
            document.view_scale(),
            svg.len()
        );
        svg
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in preview: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
