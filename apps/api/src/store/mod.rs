//! Resume State Store: the single resume, the wizard step, and the reducer that
//! moves between them.
//!
//! Every mutation goes through [`ResumeStore::dispatch`]. The reducer is pure;
//! the store persists each new value right after it is produced.

pub mod draft;
pub mod handlers;
pub mod storage;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    EducationItem, ListItem, PersonalInfoPatch, Resume, ResumeTemplate, SkillItem,
    WorkExperienceItem,
};
use storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized resume.
pub const STORAGE_KEY: &str = "resume";

/// Wizard steps in display order. The step index points into this list.
pub const WIZARD_STEPS: [&str; 6] = [
    "Personal Info",
    "Work History",
    "Education",
    "Skills",
    "Summary",
    "Finalize",
];

/// A single state transition.
///
/// Serialized as `{"type": "ADD_SKILL", "payload": {...}}`; payload-less
/// actions omit `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetTemplate(ResumeTemplate),
    SetPersonalInfo(PersonalInfoPatch),
    AddWorkExperience(WorkExperienceItem),
    UpdateWorkExperience(WorkExperienceItem),
    RemoveWorkExperience(Uuid),
    AddEducation(EducationItem),
    UpdateEducation(EducationItem),
    RemoveEducation(Uuid),
    AddSkill(SkillItem),
    UpdateSkill(SkillItem),
    RemoveSkill(Uuid),
    SetSummary(String),
    ResetResume,
    ImportResume(Resume),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetTemplate(_) => "SET_TEMPLATE",
            Action::SetPersonalInfo(_) => "SET_PERSONAL_INFO",
            Action::AddWorkExperience(_) => "ADD_WORK_EXPERIENCE",
            Action::UpdateWorkExperience(_) => "UPDATE_WORK_EXPERIENCE",
            Action::RemoveWorkExperience(_) => "REMOVE_WORK_EXPERIENCE",
            Action::AddEducation(_) => "ADD_EDUCATION",
            Action::UpdateEducation(_) => "UPDATE_EDUCATION",
            Action::RemoveEducation(_) => "REMOVE_EDUCATION",
            Action::AddSkill(_) => "ADD_SKILL",
            Action::UpdateSkill(_) => "UPDATE_SKILL",
            Action::RemoveSkill(_) => "REMOVE_SKILL",
            Action::SetSummary(_) => "SET_SUMMARY",
            Action::ResetResume => "RESET_RESUME",
            Action::ImportResume(_) => "IMPORT_RESUME",
        }
    }

    /// For `ADD_*` actions, the id of the item being appended.
    pub fn added_id(&self) -> Option<Uuid> {
        match self {
            Action::AddWorkExperience(item) => Some(item.id),
            Action::AddEducation(item) => Some(item.id),
            Action::AddSkill(item) => Some(item.id),
            _ => None,
        }
    }
}

/// Applies one action to `state`, returning the next resume. `state` is untouched.
pub fn reduce(state: &Resume, action: Action) -> Resume {
    match action {
        Action::SetTemplate(template) => Resume {
            template,
            ..state.clone()
        },
        Action::SetPersonalInfo(patch) => Resume {
            personal_info: state.personal_info.merged(patch),
            ..state.clone()
        },
        Action::AddWorkExperience(item) => Resume {
            work_experience: appended(&state.work_experience, item),
            ..state.clone()
        },
        Action::UpdateWorkExperience(item) => Resume {
            work_experience: replaced(&state.work_experience, item),
            ..state.clone()
        },
        Action::RemoveWorkExperience(id) => Resume {
            work_experience: removed(&state.work_experience, id),
            ..state.clone()
        },
        Action::AddEducation(item) => Resume {
            education: appended(&state.education, item),
            ..state.clone()
        },
        Action::UpdateEducation(item) => Resume {
            education: replaced(&state.education, item),
            ..state.clone()
        },
        Action::RemoveEducation(id) => Resume {
            education: removed(&state.education, id),
            ..state.clone()
        },
        Action::AddSkill(item) => Resume {
            skills: appended(&state.skills, item),
            ..state.clone()
        },
        Action::UpdateSkill(item) => Resume {
            skills: replaced(&state.skills, item),
            ..state.clone()
        },
        Action::RemoveSkill(id) => Resume {
            skills: removed(&state.skills, id),
            ..state.clone()
        },
        Action::SetSummary(summary) => Resume {
            summary,
            ..state.clone()
        },
        Action::ResetResume => Resume::empty(),
        Action::ImportResume(resume) => resume,
    }
}

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    next
}

fn replaced<T: ListItem + Clone>(items: &[T], item: T) -> Vec<T> {
    items
        .iter()
        .map(|existing| {
            if existing.id() == item.id() {
                item.clone()
            } else {
                existing.clone()
            }
        })
        .collect()
}

fn removed<T: ListItem + Clone>(items: &[T], id: Uuid) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

/// Owns the one resume and the wizard position, and writes every change through
/// to durable storage.
pub struct ResumeStore {
    resume: Resume,
    current_step: usize,
    storage: Arc<dyn KeyValueStorage>,
}

impl ResumeStore {
    /// Restores the last persisted resume, or starts fresh.
    ///
    /// A storage read error or an unparseable document is logged and treated as
    /// "no prior state"; startup never fails because of it. After a read error
    /// nothing is written until the first transition, so a briefly unreadable
    /// document is not clobbered at startup.
    pub async fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (resume, write_back) = match storage.get(STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Resume>(&raw) {
                Ok(resume) => {
                    info!("Restored resume {} from storage", resume.id);
                    (resume, true)
                }
                Err(e) => {
                    warn!("Stored resume could not be parsed, starting fresh: {e}");
                    (Resume::empty(), true)
                }
            },
            Ok(None) => {
                info!("No stored resume found, starting fresh");
                (Resume::empty(), true)
            }
            Err(e) => {
                warn!("Failed to read stored resume, starting fresh: {e}");
                (Resume::empty(), false)
            }
        };

        let store = Self {
            resume,
            current_step: 0,
            storage,
        };
        if write_back {
            store.persist().await;
        }
        store
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Moves the wizard to `step`. Returns `false` (and stays put) when out of range.
    pub fn set_step(&mut self, step: usize) -> bool {
        if step >= WIZARD_STEPS.len() {
            return false;
        }
        self.current_step = step;
        true
    }

    /// Reduces `action` into a new resume, persists it, and returns it.
    pub async fn dispatch(&mut self, action: Action) -> &Resume {
        let name = action.name();
        self.resume = reduce(&self.resume, action);
        debug!("Applied {name} to resume {}", self.resume.id);
        self.persist().await;
        &self.resume
    }

    /// Writes the current resume. Failures are logged, never surfaced.
    async fn persist(&self) {
        if let Err(e) = self.try_persist().await {
            warn!("Failed to persist resume {}: {e}", self.resume.id);
        }
    }

    async fn try_persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.resume)?;
        self.storage.set(STORAGE_KEY, &encoded).await
    }
}
