//! In-place edit binding.
//!
//! Every rendered field carries a [`FieldBinding`]; the client sends it back with
//! the new value as a [`FieldUpdate`]. Applying an update never mutates the
//! previous aggregate: the touched section (and for lists, the touched entry) is
//! copied and merged, everything else is carried over unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{parse_level, UnknownLevel};
use crate::models::{
    Certification, Education, Language, PersonalDetails, Project, ResumeData, Skill,
    WorkExperience,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalDetails,
    Objective,
    WorkExperience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
}

impl Section {
    pub fn key(self) -> &'static str {
        match self {
            Section::PersonalDetails => "personalDetails",
            Section::Objective => "objective",
            Section::WorkExperience => "workExperience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Languages => "languages",
            Section::Certifications => "certifications",
        }
    }

    /// Singleton sections are addressed without an index.
    pub fn is_singleton(self) -> bool {
        matches!(self, Section::PersonalDetails | Section::Objective)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("section '{0}' has no field '{1}'")]
    UnknownField(Section, String),

    #[error("section '{0}' is a list and needs an index")]
    IndexRequired(Section),

    #[error("section '{0}' is not a list and takes no index")]
    UnexpectedIndex(Section),

    #[error("index {index} is out of range for '{section}' ({len} entries)")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("field updates are only accepted in edit mode")]
    NotEditing,
}

/// Where a rendered field writes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub section: Section,
    pub index: Option<usize>,
    pub field: &'static str,
}

impl FieldBinding {
    pub fn singleton(section: Section, field: &'static str) -> Self {
        Self {
            section,
            index: None,
            field,
        }
    }

    pub fn entry(section: Section, index: usize, field: &'static str) -> Self {
        Self {
            section,
            index: Some(index),
            field,
        }
    }
}

/// A single `update_field(section, index, field, value)` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub section: Section,
    #[serde(default)]
    pub index: Option<usize>,
    pub field: String,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Record setters
// ────────────────────────────────────────────────────────────────────────────

/// A record whose text fields can be set by their wire name.
trait EditableRecord: Clone {
    const SECTION: Section;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditError>;

    fn unknown(field: &str) -> EditError {
        EditError::UnknownField(Self::SECTION, field.to_string())
    }
}

fn level_error(field: &str, err: UnknownLevel) -> EditError {
    EditError::InvalidValue {
        field: field.to_string(),
        reason: err.to_string(),
    }
}

macro_rules! text_record {
    ($ty:ty, $section:expr, { $($name:literal => $field:ident),+ $(,)? }) => {
        impl EditableRecord for $ty {
            const SECTION: Section = $section;

            fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditError> {
                match field {
                    $($name => self.$field = value.to_string(),)+
                    other => return Err(Self::unknown(other)),
                }
                Ok(())
            }
        }
    };
}

text_record!(PersonalDetails, Section::PersonalDetails, {
    "fullName" => full_name,
    "email" => email,
    "phone" => phone,
    "linkedin" => linkedin,
    "github" => github,
    "location" => location,
});

text_record!(WorkExperience, Section::WorkExperience, {
    "jobTitle" => job_title,
    "companyName" => company_name,
    "location" => location,
    "startDate" => start_date,
    "endDate" => end_date,
    "description" => description,
});

text_record!(Education, Section::Education, {
    "degree" => degree,
    "institution" => institution,
    "location" => location,
    "startDate" => start_date,
    "endDate" => end_date,
    "grade" => grade,
});

text_record!(Project, Section::Projects, {
    "projectName" => project_name,
    "description" => description,
    "link" => link,
});

text_record!(Certification, Section::Certifications, {
    "certificationName" => certification_name,
    "issuingOrganization" => issuing_organization,
    "issueDate" => issue_date,
});

impl EditableRecord for Skill {
    const SECTION: Section = Section::Skills;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditError> {
        match field {
            "category" => self.category = value.to_string(),
            "skills" => self.skills = value.to_string(),
            "proficiency" => {
                self.proficiency = parse_level(value).map_err(|e| level_error(field, e))?
            }
            other => return Err(Self::unknown(other)),
        }
        Ok(())
    }
}

impl EditableRecord for Language {
    const SECTION: Section = Section::Languages;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditError> {
        match field {
            "language" => self.language = value.to_string(),
            "proficiency" => {
                self.proficiency = parse_level(value).map_err(|e| level_error(field, e))?
            }
            other => return Err(Self::unknown(other)),
        }
        Ok(())
    }
}

/// Copies `list`, replacing entry `index` with a merged copy.
fn replace_entry<T: EditableRecord>(
    list: &[T],
    index: usize,
    field: &str,
    value: &str,
) -> Result<Vec<T>, EditError> {
    let entry = list.get(index).ok_or(EditError::IndexOutOfRange {
        section: T::SECTION,
        index,
        len: list.len(),
    })?;
    let mut merged = entry.clone();
    merged.set_field(field, value)?;

    let mut copy = list.to_vec();
    copy[index] = merged;
    Ok(copy)
}

// ────────────────────────────────────────────────────────────────────────────
// update_field
// ────────────────────────────────────────────────────────────────────────────

/// Returns a new aggregate with one field replaced.
///
/// Singleton sections take `index = None` and are shallow-merged; list sections
/// take the entry position. Length and order of every list are preserved.
pub fn update_field(data: &ResumeData, update: &FieldUpdate) -> Result<ResumeData, EditError> {
    let FieldUpdate {
        section,
        index,
        field,
        value,
    } = update;
    let section = *section;

    let index = match (section.is_singleton(), *index) {
        (true, Some(_)) => return Err(EditError::UnexpectedIndex(section)),
        (true, None) => None,
        (false, None) => return Err(EditError::IndexRequired(section)),
        (false, Some(i)) => Some(i),
    };

    let mut next = data.clone();
    match (section, index) {
        (Section::PersonalDetails, _) => {
            let mut details = data.personal_details.clone();
            details.set_field(field, value)?;
            next.personal_details = details;
        }
        (Section::Objective, _) => {
            if field != "objective" {
                return Err(EditError::UnknownField(section, field.clone()));
            }
            next.objective = value.clone();
        }
        (Section::WorkExperience, Some(i)) => {
            next.work_experience = replace_entry(&data.work_experience, i, field, value)?
        }
        (Section::Education, Some(i)) => {
            next.education = replace_entry(&data.education, i, field, value)?
        }
        (Section::Skills, Some(i)) => next.skills = replace_entry(&data.skills, i, field, value)?,
        (Section::Projects, Some(i)) => {
            next.projects = replace_entry(&data.projects, i, field, value)?
        }
        (Section::Languages, Some(i)) => {
            next.languages = replace_entry(&data.languages, i, field, value)?
        }
        (Section::Certifications, Some(i)) => {
            next.certifications = replace_entry(&data.certifications, i, field, value)?
        }
        (_, None) => return Err(EditError::IndexRequired(section)),
    }
    Ok(next)
}
