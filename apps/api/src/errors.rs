use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::edit::EditError;
use crate::export::ExportError;
use crate::store::StoreError;
use crate::wizard::ValidationErrors;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid edit: {0}")]
    Edit(#[from] EditError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<Value> = None;

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation(errors) => {
                fields = serde_json::to_value(&errors.fields).ok();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    "Some fields need attention".to_string(),
                )
            }
            AppError::Edit(e) => (StatusCode::BAD_REQUEST, "INVALID_EDIT", e.to_string()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Persistence(StoreError::NotFound(path)) => {
                tracing::debug!("Document not found: {path}");
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Resume not found".to_string(),
                )
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "Failed to save changes. Please try again.".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::error!("PDF generation failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Failed to download PDF. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = fields;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let response =
            AppError::from(ValidationErrors::single("objective", "too long")).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"][0]["path"], "objective");
    }

    #[tokio::test]
    async fn test_missing_document_maps_to_404() {
        let response =
            AppError::Persistence(StoreError::NotFound("users/x/resumes/y".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_error_hides_details() {
        let response = AppError::Export(ExportError::Pdf("font table missing".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "Failed to download PDF. Please try again."
        );
        assert!(body["error"].get("fields").is_none());
    }
}
