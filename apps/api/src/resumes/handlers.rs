use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::UserEmail;
use crate::edit::FieldUpdate;
use crate::errors::AppError;
use crate::export::{
    content_disposition, export_filename, export_pdf_blocking, ExportOptions, PDF_CONTENT_TYPE,
};
use crate::models::{ResumeData, StoredResume};
use crate::render::RenderMode;
use crate::resumes::preference::{preference_cookie, read_preference};
use crate::resumes::Viewer;
use crate::state::AppState;
use crate::store::DocumentPath;
use crate::templates::TemplateId;
use crate::wizard::{validate_all, ValidationErrors};

#[derive(Deserialize)]
pub struct CreateResumeRequest {
    pub resume: Value,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Deserialize)]
pub struct PatchResumeRequest {
    #[serde(default)]
    pub updates: Vec<FieldUpdate>,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Deserialize)]
pub struct RenderQuery {
    pub template: Option<String>,
    #[serde(default)]
    pub mode: RenderMode,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub id: Uuid,
    pub template: TemplateId,
    pub resume: ResumeData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: String,
    pub full_name: String,
    pub template: TemplateId,
}

impl ResumeResponse {
    fn from_viewer(viewer: &Viewer) -> Self {
        Self {
            id: viewer.id(),
            template: viewer.template(),
            resume: viewer.data().clone(),
        }
    }
}

async fn load(state: &AppState, user: &UserEmail, id: Uuid) -> Result<StoredResume, AppError> {
    let path = DocumentPath::resume(user.as_str(), id);
    let document = state
        .store
        .get(&path)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(StoredResume::from_document(&document)?)
}

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    user: UserEmail,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let resume: ResumeData = serde_json::from_value(req.resume)
        .map_err(|e| ValidationErrors::single("resume", e.to_string()))?;
    validate_all(&resume)?;

    let template = TemplateId::or_keep(req.template.as_deref(), state.config.default_template);
    let id = Uuid::new_v4();
    let path = DocumentPath::resume(user.as_str(), id);
    let document =
        StoredResume::new(resume.clone(), Some(template.as_str().to_string())).to_document()?;
    state.store.create(&path, document).await?;

    info!(resume_id = %id, %template, "Resume created");
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse {
            id,
            template,
            resume,
        }),
    ))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    user: UserEmail,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let documents = state
        .store
        .list(&DocumentPath::resumes_of(user.as_str()))
        .await?;

    let summaries = documents
        .into_iter()
        .filter_map(|(path, document)| match StoredResume::from_document(&document) {
            Ok(stored) => Some(ResumeSummary {
                id: path.id().to_string(),
                full_name: stored.resume.personal_details.full_name,
                template: TemplateId::or_keep(stored.template.as_deref(), TemplateId::default()),
            }),
            Err(e) => {
                warn!(%path, "Skipping unreadable resume document: {e}");
                None
            }
        })
        .collect();
    Ok(Json(summaries))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    user: UserEmail,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let viewer = Viewer::open(id, load(&state, &user, id).await?, None);
    Ok(Json(ResumeResponse::from_viewer(&viewer)))
}

/// PATCH /api/v1/resumes/:id
///
/// Applies field updates in order and saves. A failing update aborts the
/// request before anything is written.
pub async fn handle_patch(
    State(state): State<AppState>,
    user: UserEmail,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut viewer = Viewer::open(id, load(&state, &user, id).await?, None);
    if let Some(candidate) = req.template.as_deref() {
        viewer.select_template(candidate);
    }

    viewer.begin_edit();
    for update in &req.updates {
        viewer.update_field(update)?;
    }

    let document = viewer.save_document()?;
    state
        .store
        .update(&DocumentPath::resume(user.as_str(), id), document)
        .await?;
    viewer.mark_saved();

    info!(resume_id = %id, updates = req.updates.len(), template = %viewer.template(), "Resume saved");
    Ok(Json(ResumeResponse::from_viewer(&viewer)))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: UserEmail,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state
        .store
        .delete(&DocumentPath::resume(user.as_str(), id))
        .await?
    {
        info!(resume_id = %id, "Resume deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

/// GET /api/v1/resumes/:id/render?template=&mode=
///
/// An explicit, known `template` is remembered in the preference cookie.
pub async fn handle_render(
    State(state): State<AppState>,
    user: UserEmail,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let preference = read_preference(&headers);
    let mut viewer = Viewer::open(id, load(&state, &user, id).await?, preference.as_deref());

    let mut remember = None;
    if let Some(candidate) = query.template.as_deref() {
        let active = viewer.select_template(candidate);
        if candidate.parse::<TemplateId>().is_ok() {
            remember = Some(preference_cookie(active));
        }
    }
    if query.mode == RenderMode::Edit {
        viewer.begin_edit();
    }

    let mut response = Html(viewer.render()).into_response();
    if let Some(cookie) = remember {
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?,
        );
    }
    Ok(response)
}

/// GET /api/v1/resumes/:id/export?template=
pub async fn handle_export(
    State(state): State<AppState>,
    user: UserEmail,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let preference = read_preference(&headers);
    let mut viewer = Viewer::open(id, load(&state, &user, id).await?, preference.as_deref());
    if let Some(candidate) = query.template.as_deref() {
        viewer.select_template(candidate);
    }

    let filename = export_filename(viewer.data(), Utc::now().date_naive());
    let pdf = export_pdf_blocking(
        viewer.data().clone(),
        viewer.template(),
        ExportOptions::default(),
    )
    .await?;
    info!(resume_id = %id, template = %viewer.template(), bytes = pdf.len(), "PDF exported");

    let mut response = Bytes::from(pdf).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(PDF_CONTENT_TYPE),
    );
    response_headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition(&filename)).map_err(anyhow::Error::from)?,
    );
    Ok(response)
}
