use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Proficiency levels
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageLevel {
    Basic,
    Fluent,
    Native,
}

/// Returned when a proficiency string is not one of the enumerated levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel {
    pub value: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid enum value. Expected {}, received '{}'",
            self.expected.join(" | "),
            self.value
        )
    }
}

impl std::error::Error for UnknownLevel {}

impl SkillLevel {
    pub const ALL: &'static [&'static str] = &["Beginner", "Intermediate", "Advanced"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Beginner" => Ok(SkillLevel::Beginner),
            "Intermediate" => Ok(SkillLevel::Intermediate),
            "Advanced" => Ok(SkillLevel::Advanced),
            other => Err(UnknownLevel {
                value: other.to_string(),
                expected: Self::ALL,
            }),
        }
    }
}

impl LanguageLevel {
    pub const ALL: &'static [&'static str] = &["Basic", "Fluent", "Native"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::Basic => "Basic",
            LanguageLevel::Fluent => "Fluent",
            LanguageLevel::Native => "Native",
        }
    }
}

impl FromStr for LanguageLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Basic" => Ok(LanguageLevel::Basic),
            "Fluent" => Ok(LanguageLevel::Fluent),
            "Native" => Ok(LanguageLevel::Native),
            other => Err(UnknownLevel {
                value: other.to_string(),
                expected: Self::ALL,
            }),
        }
    }
}

/// Parses an optional enumerated level where the empty string means "not set".
pub fn parse_level<T>(value: &str) -> Result<Option<T>, UnknownLevel>
where
    T: FromStr<Err = UnknownLevel>,
{
    if value.trim().is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

fn deserialize_level<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownLevel>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_level(&s).map_err(serde::de::Error::custom),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume entities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub start_date: String,
    /// Empty while the position is ongoing.
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub grade: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub category: String,
    pub skills: String,
    #[serde(deserialize_with = "deserialize_level")]
    pub proficiency: Option<SkillLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub project_name: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub language: String,
    #[serde(deserialize_with = "deserialize_level")]
    pub proficiency: Option<LanguageLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub certification_name: String,
    pub issuing_organization: String,
    pub issue_date: String,
}

/// The resume aggregate. List order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_details: PersonalDetails,
    pub objective: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
}

// ────────────────────────────────────────────────────────────────────────────
// Content predicate
// ────────────────────────────────────────────────────────────────────────────

/// Whether a section has anything worth rendering.
///
/// Strings count when non-blank, lists when non-empty, records when any
/// string field is non-blank or any optional field is set.
pub trait HasContent {
    fn has_content(&self) -> bool;
}

impl HasContent for String {
    fn has_content(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl HasContent for str {
    fn has_content(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T> HasContent for Vec<T> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: HasContent> HasContent for Option<T> {
    fn has_content(&self) -> bool {
        self.as_ref().is_some_and(HasContent::has_content)
    }
}

impl HasContent for SkillLevel {
    fn has_content(&self) -> bool {
        true
    }
}

impl HasContent for LanguageLevel {
    fn has_content(&self) -> bool {
        true
    }
}

macro_rules! record_has_content {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl HasContent for $ty {
            fn has_content(&self) -> bool {
                false $(|| self.$field.has_content())+
            }
        }
    };
}

record_has_content!(PersonalDetails { full_name, email, phone, linkedin, github, location });
record_has_content!(WorkExperience { job_title, company_name, location, start_date, end_date, description });
record_has_content!(Education { degree, institution, location, start_date, end_date, grade });
record_has_content!(Skill { category, skills, proficiency });
record_has_content!(Project { project_name, description, link });
record_has_content!(Language { language, proficiency });
record_has_content!(Certification { certification_name, issuing_organization, issue_date });

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
