#![allow(dead_code)]

//! In-memory form state for one resume submission.
//!
//! The form always starts with a single blank work experience and never lets
//! the list shrink below one entry through `remove_work_experience`.

pub mod validation;

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{ExperienceField, ResumeField, ResumeSubmission, WorkExperience};

pub use validation::{validate_submission, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeForm {
    submission: ResumeSubmission,
}

impl Default for ResumeForm {
    fn default() -> Self {
        Self {
            submission: ResumeSubmission {
                work_experiences: vec![WorkExperience::default()],
                ..Default::default()
            },
        }
    }
}

impl From<ResumeSubmission> for ResumeForm {
    fn from(submission: ResumeSubmission) -> Self {
        Self { submission }
    }
}

impl ResumeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form from a JSON document using the webhook's camelCase keys.
    /// Absent fields load as empty and are caught by `validate`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let submission: ResumeSubmission =
            serde_json::from_str(raw).context("Form file is not a valid resume document")?;
        Ok(Self::from(submission))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read form file '{}'", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn field(&self, field: ResumeField) -> &str {
        self.submission.field(field)
    }

    pub fn set_field(&mut self, field: ResumeField, value: impl Into<String>) {
        *self.submission.field_mut(field) = value.into();
    }

    pub fn work_experiences(&self) -> &[WorkExperience] {
        &self.submission.work_experiences
    }

    pub fn add_work_experience(&mut self) {
        self.submission
            .work_experiences
            .push(WorkExperience::default());
    }

    /// Removes the entry at `index`. Refuses when only one entry is left.
    pub fn remove_work_experience(&mut self, index: usize) -> bool {
        let experiences = &mut self.submission.work_experiences;
        if experiences.len() <= 1 || index >= experiences.len() {
            return false;
        }
        experiences.remove(index);
        true
    }

    pub fn update_work_experience(
        &mut self,
        index: usize,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> bool {
        match self.submission.work_experiences.get_mut(index) {
            Some(exp) => {
                exp.set(field, value.into());
                true
            }
            None => false,
        }
    }

    pub fn submission(&self) -> &ResumeSubmission {
        &self.submission
    }

    pub fn validate(&self) -> Result<&ResumeSubmission, ValidationError> {
        validate_submission(&self.submission)?;
        Ok(&self.submission)
    }
}
