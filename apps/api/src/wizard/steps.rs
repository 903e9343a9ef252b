use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    Certification, Education, Language, PersonalDetails, Project, ResumeData, Skill,
    WorkExperience,
};
use crate::wizard::validation::ValidationErrors;

/// The wizard steps in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    PersonalInfo,
    CareerObjective,
    WorkExperience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::PersonalInfo,
        Step::CareerObjective,
        Step::WorkExperience,
        Step::Education,
        Step::Skills,
        Step::Projects,
        Step::Languages,
        Step::Certifications,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn key(self) -> &'static str {
        match self {
            Step::PersonalInfo => "personal_info",
            Step::CareerObjective => "career_objective",
            Step::WorkExperience => "work_experience",
            Step::Education => "education",
            Step::Skills => "skills",
            Step::Projects => "projects",
            Step::Languages => "languages",
            Step::Certifications => "certifications",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Info",
            Step::CareerObjective => "Career Objective",
            Step::WorkExperience => "Work Experience",
            Step::Education => "Education",
            Step::Skills => "Skills",
            Step::Projects => "Projects",
            Step::Languages => "Languages",
            Step::Certifications => "Certifications",
        }
    }

    /// The `ResumeData` key this step owns.
    pub fn section_key(self) -> &'static str {
        match self {
            Step::PersonalInfo => "personalDetails",
            Step::CareerObjective => "objective",
            Step::WorkExperience => "workExperience",
            Step::Education => "education",
            Step::Skills => "skills",
            Step::Projects => "projects",
            Step::Languages => "languages",
            Step::Certifications => "certifications",
        }
    }

    pub fn next(self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.key() == s)
            .ok_or_else(|| format!("unknown wizard step '{s}'"))
    }
}

/// Summary of a step for clients building the wizard UI.
#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub index: usize,
    pub key: &'static str,
    pub title: &'static str,
    pub section: &'static str,
}

pub fn steps() -> Vec<StepInfo> {
    Step::ALL
        .iter()
        .map(|step| StepInfo {
            index: step.index(),
            key: step.key(),
            title: step.title(),
            section: step.section_key(),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Step input
// ────────────────────────────────────────────────────────────────────────────

/// The fragment of `ResumeData` one step collects.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    PersonalInfo(PersonalDetails),
    CareerObjective(String),
    WorkExperience(Vec<WorkExperience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
    Languages(Vec<Language>),
    Certifications(Vec<Certification>),
}

fn section_from<T>(step: Step, fragment: &Value) -> Result<T, ValidationErrors>
where
    T: serde::de::DeserializeOwned + Default,
{
    match fragment.get(step.section_key()) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| ValidationErrors::single(step.section_key(), e.to_string())),
    }
}

impl StepInput {
    /// Parses a step fragment shaped like a partial `ResumeData`
    /// (`{"personalDetails": {...}}`). A missing section reads as empty.
    pub fn from_json(step: Step, fragment: &Value) -> Result<Self, ValidationErrors> {
        Ok(match step {
            Step::PersonalInfo => StepInput::PersonalInfo(section_from(step, fragment)?),
            Step::CareerObjective => StepInput::CareerObjective(section_from(step, fragment)?),
            Step::WorkExperience => StepInput::WorkExperience(section_from(step, fragment)?),
            Step::Education => StepInput::Education(section_from(step, fragment)?),
            Step::Skills => StepInput::Skills(section_from(step, fragment)?),
            Step::Projects => StepInput::Projects(section_from(step, fragment)?),
            Step::Languages => StepInput::Languages(section_from(step, fragment)?),
            Step::Certifications => StepInput::Certifications(section_from(step, fragment)?),
        })
    }

    pub fn step(&self) -> Step {
        match self {
            StepInput::PersonalInfo(_) => Step::PersonalInfo,
            StepInput::CareerObjective(_) => Step::CareerObjective,
            StepInput::WorkExperience(_) => Step::WorkExperience,
            StepInput::Education(_) => Step::Education,
            StepInput::Skills(_) => Step::Skills,
            StepInput::Projects(_) => Step::Projects,
            StepInput::Languages(_) => Step::Languages,
            StepInput::Certifications(_) => Step::Certifications,
        }
    }

    /// Replaces the section this input belongs to.
    pub fn write_to(self, draft: &mut ResumeData) {
        match self {
            StepInput::PersonalInfo(v) => draft.personal_details = v,
            StepInput::CareerObjective(v) => draft.objective = v,
            StepInput::WorkExperience(v) => draft.work_experience = v,
            StepInput::Education(v) => draft.education = v,
            StepInput::Skills(v) => draft.skills = v,
            StepInput::Projects(v) => draft.projects = v,
            StepInput::Languages(v) => draft.languages = v,
            StepInput::Certifications(v) => draft.certifications = v,
        }
    }
}
