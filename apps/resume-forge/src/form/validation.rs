use thiserror::Error;

use crate::models::{ExperienceField, ResumeField, ResumeSubmission};
use crate::notifications::Notification;

/// Why a submission was blocked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the {} field.", .0.label())]
    MissingField(ResumeField),

    #[error("Please fill in all work experience fields.")]
    IncompleteExperience {
        index: usize,
        field: ExperienceField,
    },

    #[error("Please fill in all work experience fields.")]
    NoExperience,
}

impl ValidationError {
    pub fn notification(&self) -> Notification {
        let title = match self {
            ValidationError::MissingField(_) => "Missing Information",
            ValidationError::IncompleteExperience { .. } | ValidationError::NoExperience => {
                "Missing Work Experience"
            }
        };
        Notification::destructive(title, self.to_string())
    }
}

/// Checks the scalar fields in declared order, then every work experience.
/// Stops at the first gap.
pub fn validate_submission(submission: &ResumeSubmission) -> Result<(), ValidationError> {
    if let Some(field) = ResumeField::ALL
        .into_iter()
        .find(|field| submission.field(*field).is_empty())
    {
        return Err(ValidationError::MissingField(field));
    }

    if submission.work_experiences.is_empty() {
        return Err(ValidationError::NoExperience);
    }

    for (index, exp) in submission.work_experiences.iter().enumerate() {
        if let Some(field) = exp.first_missing() {
            return Err(ValidationError::IncompleteExperience { index, field });
        }
    }

    Ok(())
}
