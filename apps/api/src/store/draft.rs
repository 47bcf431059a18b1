//! Transient edit state for a work-experience entry.
//!
//! Toggling "current position" on clears the end date in the same edit, and
//! toggling it off leaves the end date blank. This normalization lives only
//! here; the reducer accepts whatever item it is given.

use thiserror::Error;
use uuid::Uuid;

use crate::models::WorkExperienceItem;
use crate::store::Action;

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkExperienceDraft {
    item: WorkExperienceItem,
    editing_existing: bool,
}

impl WorkExperienceDraft {
    /// Blank draft for a new entry, with a freshly generated id.
    pub fn new() -> Self {
        Self {
            item: WorkExperienceItem {
                id: Uuid::new_v4(),
                company: String::new(),
                position: String::new(),
                start_date: String::new(),
                end_date: String::new(),
                current: false,
                description: String::new(),
            },
            editing_existing: false,
        }
    }

    /// Draft opened on an already committed entry; commits as an update.
    pub fn edit(item: WorkExperienceItem) -> Self {
        Self {
            item,
            editing_existing: true,
        }
    }

    #[cfg(test)]
    pub fn item(&self) -> &WorkExperienceItem {
        &self.item
    }

    pub fn set_company(&mut self, company: impl Into<String>) {
        self.item.company = company.into();
    }

    pub fn set_position(&mut self, position: impl Into<String>) {
        self.item.position = position.into();
    }

    pub fn set_start_date(&mut self, start_date: impl Into<String>) {
        self.item.start_date = start_date.into();
    }

    pub fn set_end_date(&mut self, end_date: impl Into<String>) {
        self.item.end_date = end_date.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.item.description = description.into();
    }

    /// Sets the "current position" flag. Turning it on clears `end_date`;
    /// turning it off does not bring the old value back.
    pub fn set_current(&mut self, current: bool) {
        self.item.current = current;
        if current {
            self.item.end_date.clear();
        }
    }

    /// Validates the form and turns it into the action that commits it.
    pub fn commit(self) -> Result<Action, DraftError> {
        if self.item.company.trim().is_empty() {
            return Err(DraftError::MissingField("company"));
        }
        if self.item.position.trim().is_empty() {
            return Err(DraftError::MissingField("position"));
        }
        if self.item.start_date.trim().is_empty() {
            return Err(DraftError::MissingField("startDate"));
        }

        Ok(if self.editing_existing {
            Action::UpdateWorkExperience(self.item)
        } else {
            Action::AddWorkExperience(self.item)
        })
    }
}

impl Default for WorkExperienceDraft {
    fn default() -> Self {
        Self::new()
    }
}
