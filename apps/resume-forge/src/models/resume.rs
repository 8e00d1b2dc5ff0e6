#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// One entry of the work-experience section. All four fields are mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub position: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

impl WorkExperience {
    pub fn get(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::Position => &self.position,
            ExperienceField::Company => &self.company,
            ExperienceField::Duration => &self.duration,
            ExperienceField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: ExperienceField, value: String) {
        let slot = match field {
            ExperienceField::Position => &mut self.position,
            ExperienceField::Company => &mut self.company,
            ExperienceField::Duration => &mut self.duration,
            ExperienceField::Description => &mut self.description,
        };
        *slot = value;
    }

    /// First field left empty, in declaration order.
    pub fn first_missing(&self) -> Option<ExperienceField> {
        ExperienceField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }
}

/// The full payload sent to the generation endpoint.
///
/// Serialized with camelCase keys (`fullName`, `jobTitle`, `workExperiences`, ...)
/// because that is the shape the webhook consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub summary: String,
    pub skills: String,
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
    pub work_experiences: Vec<WorkExperience>,
}

impl ResumeSubmission {
    pub fn field(&self, field: ResumeField) -> &str {
        match field {
            ResumeField::FullName => &self.full_name,
            ResumeField::Email => &self.email,
            ResumeField::Phone => &self.phone,
            ResumeField::JobTitle => &self.job_title,
            ResumeField::Summary => &self.summary,
            ResumeField::Skills => &self.skills,
            ResumeField::Degree => &self.degree,
            ResumeField::Institution => &self.institution,
            ResumeField::GraduationYear => &self.graduation_year,
        }
    }

    pub fn field_mut(&mut self, field: ResumeField) -> &mut String {
        match field {
            ResumeField::FullName => &mut self.full_name,
            ResumeField::Email => &mut self.email,
            ResumeField::Phone => &mut self.phone,
            ResumeField::JobTitle => &mut self.job_title,
            ResumeField::Summary => &mut self.summary,
            ResumeField::Skills => &mut self.skills,
            ResumeField::Degree => &mut self.degree,
            ResumeField::Institution => &mut self.institution,
            ResumeField::GraduationYear => &mut self.graduation_year,
        }
    }

    /// Splits the comma-separated skills string into trimmed, non-empty entries.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Required scalar fields, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResumeField {
    FullName,
    Email,
    Phone,
    JobTitle,
    Summary,
    Skills,
    Degree,
    Institution,
    GraduationYear,
}

impl ResumeField {
    pub const ALL: [ResumeField; 9] = [
        ResumeField::FullName,
        ResumeField::Email,
        ResumeField::Phone,
        ResumeField::JobTitle,
        ResumeField::Summary,
        ResumeField::Skills,
        ResumeField::Degree,
        ResumeField::Institution,
        ResumeField::GraduationYear,
    ];

    /// Wire key of the field.
    pub fn key(self) -> &'static str {
        match self {
            ResumeField::FullName => "fullName",
            ResumeField::Email => "email",
            ResumeField::Phone => "phone",
            ResumeField::JobTitle => "jobTitle",
            ResumeField::Summary => "summary",
            ResumeField::Skills => "skills",
            ResumeField::Degree => "degree",
            ResumeField::Institution => "institution",
            ResumeField::GraduationYear => "graduationYear",
        }
    }

    /// User-facing label, e.g. `graduationYear` -> `graduation year`.
    pub fn label(self) -> String {
        humanize(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceField {
    Position,
    Company,
    Duration,
    Description,
}

impl ExperienceField {
    pub const ALL: [ExperienceField; 4] = [
        ExperienceField::Position,
        ExperienceField::Company,
        ExperienceField::Duration,
        ExperienceField::Description,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ExperienceField::Position => "position",
            ExperienceField::Company => "company",
            ExperienceField::Duration => "duration",
            ExperienceField::Description => "description",
        }
    }
}

/// Splits a camelCase identifier at its capitals and lower-cases the result.
pub fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
