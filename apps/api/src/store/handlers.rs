//! Axum route handlers for the resume state and wizard.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Resume, ResumeTemplate};
use crate::state::AppState;
use crate::store::draft::WorkExperienceDraft;
use crate::store::{Action, ResumeStore, WIZARD_STEPS};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeStateResponse {
    pub resume: Resume,
    pub current_step: usize,
    pub steps: Vec<&'static str>,
    /// Template names a client can offer, in display order.
    pub templates: Vec<&'static str>,
}

impl ResumeStateResponse {
    fn from_store(store: &ResumeStore) -> Self {
        Self {
            resume: store.resume().clone(),
            current_step: store.current_step(),
            steps: WIZARD_STEPS.to_vec(),
            templates: ResumeTemplate::ALL.iter().map(|t| t.as_str()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStepRequest {
    pub step: usize,
}

/// Field edits for a work-experience entry, applied through the edit form rules.
/// `current` is applied last, so switching it on wins over a submitted end date.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEdit {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl WorkExperienceEdit {
    fn apply_to(self, draft: &mut WorkExperienceDraft) {
        if let Some(company) = self.company {
            draft.set_company(company);
        }
        if let Some(position) = self.position {
            draft.set_position(position);
        }
        if let Some(start_date) = self.start_date {
            draft.set_start_date(start_date);
        }
        if let Some(end_date) = self.end_date {
            draft.set_end_date(end_date);
        }
        if let Some(description) = self.description {
            draft.set_description(description);
        }
        if let Some(current) = self.current {
            draft.set_current(current);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeStateResponse> {
    let store = state.store.read().await;
    Json(ResumeStateResponse::from_store(&store))
}

/// POST /api/v1/resume/actions
///
/// Applies one action and returns the resulting resume. `ADD_*` actions whose id
/// is already present are refused before they reach the reducer.
pub async fn handle_dispatch(
    State(state): State<AppState>,
    Json(action): Json<Action>,
) -> Result<Json<Resume>, AppError> {
    let mut store = state.store.write().await;

    if let Some(id) = action.added_id() {
        if contains_id(store.resume(), id) {
            return Err(AppError::Conflict(format!(
                "An item with id {id} already exists"
            )));
        }
    }

    let resume = store.dispatch(action).await.clone();
    Ok(Json(resume))
}

/// PUT /api/v1/wizard/step
pub async fn handle_set_step(
    State(state): State<AppState>,
    Json(request): Json<SetStepRequest>,
) -> Result<Json<ResumeStateResponse>, AppError> {
    let mut store = state.store.write().await;
    if !store.set_step(request.step) {
        return Err(AppError::Validation(format!(
            "step must be between 0 and {}",
            WIZARD_STEPS.len() - 1
        )));
    }
    Ok(Json(ResumeStateResponse::from_store(&store)))
}

/// POST /api/v1/resume/work-experience
///
/// Builds a new entry through the edit form and commits it as `ADD_WORK_EXPERIENCE`.
pub async fn handle_create_work_experience(
    State(state): State<AppState>,
    Json(edit): Json<WorkExperienceEdit>,
) -> Result<Json<Resume>, AppError> {
    let mut draft = WorkExperienceDraft::new();
    edit.apply_to(&mut draft);
    let action = draft.commit()?;

    let mut store = state.store.write().await;
    let resume = store.dispatch(action).await.clone();
    Ok(Json(resume))
}

/// PATCH /api/v1/resume/work-experience/:id
///
/// Opens the entry as an edit draft, applies the edits (including the
/// "current position clears end date" rule) and commits it as `UPDATE_WORK_EXPERIENCE`.
pub async fn handle_edit_work_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<WorkExperienceEdit>,
) -> Result<Json<Resume>, AppError> {
    let mut store = state.store.write().await;

    let existing = store
        .resume()
        .work_experience
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Work experience {id} not found")))?;

    let mut draft = WorkExperienceDraft::edit(existing);
    edit.apply_to(&mut draft);
    let action = draft.commit()?;

    let resume = store.dispatch(action).await.clone();
    Ok(Json(resume))
}

fn contains_id(resume: &Resume, id: Uuid) -> bool {
    resume.work_experience.iter().any(|item| item.id == id)
        || resume.education.iter().any(|item| item.id == id)
        || resume.skills.iter().any(|item| item.id == id)
}
