use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::ResumeData;
use crate::wizard::{steps, validate_input, Advance, Step, StepInfo, StepInput, Wizard};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Back,
}

/// The wizard is stateless on the server: clients send the whole state back.
#[derive(Deserialize)]
pub struct AdvanceRequest {
    #[serde(default)]
    pub wizard: Wizard,
    #[serde(default)]
    pub direction: Direction,
    /// Section fragment for the current step, e.g. `{"education": [...]}`.
    #[serde(default)]
    pub fragment: Value,
}

#[derive(Serialize)]
pub struct AdvanceResponse {
    pub wizard: Wizard,
    pub complete: bool,
    /// The validated aggregate, once the last step is done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeData>,
}

fn parse_step(step: &str) -> Result<Step, AppError> {
    step.parse().map_err(AppError::BadRequest)
}

/// GET /api/v1/wizard/steps
pub async fn handle_steps() -> Json<Vec<StepInfo>> {
    Json(steps())
}

/// POST /api/v1/wizard/steps/:step/validate
pub async fn handle_validate_step(
    Path(step): Path<String>,
    Json(fragment): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let step = parse_step(&step)?;
    let input = StepInput::from_json(step, &fragment)?;
    validate_input(&input)?;
    Ok(Json(json!({ "valid": true, "step": step })))
}

/// POST /api/v1/wizard/advance
pub async fn handle_advance(Json(req): Json<AdvanceRequest>) -> Result<Json<AdvanceResponse>, AppError> {
    let mut wizard = req.wizard;

    if req.direction == Direction::Back {
        wizard.back();
        return Ok(Json(AdvanceResponse {
            wizard,
            complete: false,
            resume: None,
        }));
    }

    let input = StepInput::from_json(wizard.step, &req.fragment)?;
    let resume = match wizard.advance(input)? {
        Advance::Next(_) => None,
        Advance::Complete => Some(wizard.finish()?),
    };
    Ok(Json(AdvanceResponse {
        complete: resume.is_some(),
        wizard,
        resume,
    }))
}
