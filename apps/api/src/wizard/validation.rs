//! Per-step field validation.
//!
//! Each step validates only the section it owns. Errors carry the dotted path
//! of the offending field (`workExperience.1.jobTitle`) so the client can attach
//! the message next to its input.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{
    Certification, Education, Language, PersonalDetails, Project, ResumeData, Skill,
    WorkExperience,
};
use crate::wizard::steps::{Step, StepInput};

pub const OBJECTIVE_MAX_CHARS: usize = 500;
pub const WORK_DESCRIPTION_MAX_CHARS: usize = 2000;
pub const PROJECT_DESCRIPTION_MAX_CHARS: usize = 1000;
pub const PHONE_MIN_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(path, message);
        errors
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.fields.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.fields.extend(other.fields);
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        f.write_str(&joined.join("; "))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field rules
// ────────────────────────────────────────────────────────────────────────────

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Accepts absolute http(s) URLs only.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

pub fn phone_digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

struct Checker<'a> {
    prefix: String,
    errors: &'a mut ValidationErrors,
}

impl<'a> Checker<'a> {
    fn new(prefix: String, errors: &'a mut ValidationErrors) -> Self {
        Self { prefix, errors }
    }

    fn fail(&mut self, field: &str, message: &str) {
        let path = if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        };
        self.errors.push(path, message);
    }

    fn required(&mut self, field: &str, value: &str, message: &str) {
        if is_blank(value) {
            self.fail(field, message);
        }
    }

    fn max_chars(&mut self, field: &str, value: &str, max: usize, message: &str) {
        if value.chars().count() > max {
            self.fail(field, message);
        }
    }

    fn optional_url(&mut self, field: &str, value: &str, message: &str) {
        if !is_blank(value) && !is_valid_url(value) {
            self.fail(field, message);
        }
    }
}

fn validate_personal(details: &PersonalDetails, errors: &mut ValidationErrors) {
    let mut check = Checker::new("personalDetails".to_string(), errors);
    check.required("fullName", &details.full_name, "Full Name is required");
    if !is_valid_email(&details.email) {
        check.fail("email", "Invalid email address");
    }
    if phone_digit_count(&details.phone) < PHONE_MIN_DIGITS {
        check.fail("phone", "Phone number must have at least 10 digits");
    }
    check.optional_url("linkedin", &details.linkedin, "Invalid LinkedIn URL");
    check.optional_url("github", &details.github, "Invalid GitHub/Portfolio URL");
}

fn validate_objective(objective: &str, errors: &mut ValidationErrors) {
    Checker::new(String::new(), errors).max_chars(
        "objective",
        objective,
        OBJECTIVE_MAX_CHARS,
        "Objective must be less than 500 characters",
    );
}

fn validate_work(entries: &[WorkExperience], errors: &mut ValidationErrors) {
    for (i, entry) in entries.iter().enumerate() {
        let mut check = Checker::new(format!("workExperience.{i}"), errors);
        check.required("jobTitle", &entry.job_title, "Job Title is required");
        check.required("companyName", &entry.company_name, "Company Name is required");
        check.required("startDate", &entry.start_date, "Start date is required");
        check.max_chars(
            "description",
            &entry.description,
            WORK_DESCRIPTION_MAX_CHARS,
            "Description must be less than 2000 characters",
        );
    }
}

fn validate_education(entries: &[Education], errors: &mut ValidationErrors) {
    for (i, entry) in entries.iter().enumerate() {
        let mut check = Checker::new(format!("education.{i}"), errors);
        check.required("degree", &entry.degree, "Degree is required");
        check.required(
            "institution",
            &entry.institution,
            "School/University Name is required",
        );
        check.required("startDate", &entry.start_date, "Start date is required");
    }
}

fn validate_skills(entries: &[Skill], errors: &mut ValidationErrors) {
    for (i, entry) in entries.iter().enumerate() {
        Checker::new(format!("skills.{i}"), errors).required(
            "skills",
            &entry.skills,
            "Skill is required",
        );
    }
}

fn validate_projects(entries: &[Project], errors: &mut ValidationErrors) {
    for (i, entry) in entries.iter().enumerate() {
        let mut check = Checker::new(format!("projects.{i}"), errors);
        check.required("projectName", &entry.project_name, "Project Name is required");
        check.required("description", &entry.description, "Description is required");
        check.max_chars(
            "description",
            &entry.description,
            PROJECT_DESCRIPTION_MAX_CHARS,
            "Description must be less than 1000 characters",
        );
        check.optional_url("link", &entry.link, "Invalid URL");
    }
}

fn validate_languages(entries: &[Language], errors: &mut ValidationErrors) {
    for (i, entry) in entries.iter().enumerate() {
        Checker::new(format!("languages.{i}"), errors).required(
            "language",
            &entry.language,
            "Language is required",
        );
    }
}

fn validate_certifications(entries: &[Certification], errors: &mut ValidationErrors) {
    for (i, entry) in entries.iter().enumerate() {
        let mut check = Checker::new(format!("certifications.{i}"), errors);
        check.required(
            "certificationName",
            &entry.certification_name,
            "Certification Name is required",
        );
        check.required(
            "issuingOrganization",
            &entry.issuing_organization,
            "Issuing Organization is required",
        );
        check.required("issueDate", &entry.issue_date, "Issue Date is required");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

pub fn validate_input(input: &StepInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    match input {
        StepInput::PersonalInfo(v) => validate_personal(v, &mut errors),
        StepInput::CareerObjective(v) => validate_objective(v, &mut errors),
        StepInput::WorkExperience(v) => validate_work(v, &mut errors),
        StepInput::Education(v) => validate_education(v, &mut errors),
        StepInput::Skills(v) => validate_skills(v, &mut errors),
        StepInput::Projects(v) => validate_projects(v, &mut errors),
        StepInput::Languages(v) => validate_languages(v, &mut errors),
        StepInput::Certifications(v) => validate_certifications(v, &mut errors),
    }
    errors.into_result()
}

/// Validates the section of `data` that `step` owns.
pub fn validate_step(step: Step, data: &ResumeData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    match step {
        Step::PersonalInfo => validate_personal(&data.personal_details, &mut errors),
        Step::CareerObjective => validate_objective(&data.objective, &mut errors),
        Step::WorkExperience => validate_work(&data.work_experience, &mut errors),
        Step::Education => validate_education(&data.education, &mut errors),
        Step::Skills => validate_skills(&data.skills, &mut errors),
        Step::Projects => validate_projects(&data.projects, &mut errors),
        Step::Languages => validate_languages(&data.languages, &mut errors),
        Step::Certifications => validate_certifications(&data.certifications, &mut errors),
    }
    errors.into_result()
}

/// Validates every step, collecting all failures.
pub fn validate_all(data: &ResumeData) -> Result<(), ValidationErrors> {
    let mut all = ValidationErrors::default();
    for step in Step::ALL {
        if let Err(errors) = validate_step(step, data) {
            all.extend(errors);
        }
    }
    all.into_result()
}
