//! Multi-step form wizard.
//!
//! Each step owns one section of `ResumeData`. Advancing validates that section
//! and writes it into the draft; going back never validates.

pub mod handlers;
pub mod steps;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::models::ResumeData;

pub use steps::{steps, Step, StepInfo, StepInput};
pub use validation::{validate_all, validate_input, validate_step, FieldError, ValidationErrors};

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "step", rename_all = "snake_case")]
pub enum Advance {
    Next(Step),
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wizard {
    pub step: Step,
    pub draft: ResumeData,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes editing an existing aggregate from the first step.
    pub fn from_draft(draft: ResumeData) -> Self {
        Self {
            step: Step::default(),
            draft,
        }
    }

    /// Validates `input` for the current step, writes it into the draft and
    /// moves forward. The draft is untouched when validation fails.
    pub fn advance(&mut self, input: StepInput) -> Result<Advance, ValidationErrors> {
        if input.step() != self.step {
            return Err(ValidationErrors::single(
                input.step().section_key(),
                format!(
                    "Expected input for step '{}', got '{}'",
                    self.step,
                    input.step()
                ),
            ));
        }
        validate_input(&input)?;
        input.write_to(&mut self.draft);

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Next(next))
            }
            None => Ok(Advance::Complete),
        }
    }

    /// Steps back without validating. Returns false on the first step.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.step.next().is_none()
    }

    /// Validates every step and yields the finished aggregate.
    pub fn finish(&self) -> Result<ResumeData, ValidationErrors> {
        validate_all(&self.draft)?;
        Ok(self.draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Education, PersonalDetails};

    fn personal() -> StepInput {
        StepInput::PersonalInfo(PersonalDetails {
            full_name: "Alan Turing".to_string(),
            email: "alan@bletchley.uk".to_string(),
            phone: "01234 567890".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_advance_moves_through_steps() {
        let mut wizard = Wizard::new();
        assert_eq!(
            wizard.advance(personal()),
            Ok(Advance::Next(Step::CareerObjective))
        );
        assert_eq!(wizard.draft.personal_details.full_name, "Alan Turing");
        assert_eq!(
            wizard.advance(StepInput::CareerObjective("Break codes".to_string())),
            Ok(Advance::Next(Step::WorkExperience))
        );
        assert_eq!(wizard.step, Step::WorkExperience);
    }

    #[test]
    fn test_invalid_input_blocks_advance_and_keeps_draft() {
        let mut wizard = Wizard::new();
        let bad = StepInput::PersonalInfo(PersonalDetails::default());
        let errors = wizard.advance(bad).unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(wizard.step, Step::PersonalInfo);
        assert_eq!(wizard.draft, ResumeData::default());
    }

    #[test]
    fn test_input_for_wrong_step_is_rejected() {
        let mut wizard = Wizard::new();
        let result = wizard.advance(StepInput::Education(vec![]));
        assert!(result.is_err());
        assert_eq!(wizard.step, Step::PersonalInfo);
    }

    #[test]
    fn test_last_step_completes() {
        let mut wizard = Wizard {
            step: Step::Certifications,
            draft: ResumeData::default(),
        };
        assert!(wizard.is_last_step());
        assert_eq!(
            wizard.advance(StepInput::Certifications(vec![])),
            Ok(Advance::Complete)
        );
        assert_eq!(wizard.step, Step::Certifications);
    }

    #[test]
    fn test_back_does_not_validate() {
        let mut wizard = Wizard {
            step: Step::Education,
            draft: ResumeData::default(),
        };
        assert!(wizard.back());
        assert_eq!(wizard.step, Step::WorkExperience);
        wizard.step = Step::PersonalInfo;
        assert!(!wizard.back());
    }

    #[test]
    fn test_finish_validates_every_step() {
        let mut wizard = Wizard::new();
        wizard.advance(personal()).unwrap();
        wizard.draft.education = vec![Education::default()];
        let errors = wizard.finish().unwrap_err();
        assert_eq!(errors.fields[0].path, "education.0.degree");

        wizard.draft.education.clear();
        let done = wizard.finish().unwrap();
        assert_eq!(done.personal_details.full_name, "Alan Turing");
    }

    #[test]
    fn test_advance_serializes_with_status_tag() {
        let next = serde_json::to_value(Advance::Next(Step::Skills)).unwrap();
        assert_eq!(next["status"], "next");
        assert_eq!(next["step"], "skills");
        let done = serde_json::to_value(Advance::Complete).unwrap();
        assert_eq!(done["status"], "complete");
    }
}
