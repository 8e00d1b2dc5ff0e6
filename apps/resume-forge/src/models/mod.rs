pub mod resume;

pub use resume::{ExperienceField, ResumeField, ResumeSubmission, WorkExperience};
