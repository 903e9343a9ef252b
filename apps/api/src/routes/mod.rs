pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard API
        .route("/api/v1/wizard/steps", get(wizard::handle_steps))
        .route(
            "/api/v1/wizard/steps/:step/validate",
            post(wizard::handle_validate_step),
        )
        .route("/api/v1/wizard/advance", post(wizard::handle_advance))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(handlers::handle_create).get(handlers::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get)
                .patch(handlers::handle_patch)
                .delete(handlers::handle_delete),
        )
        .route("/api/v1/resumes/:id/render", get(handlers::handle_render))
        .route("/api/v1/resumes/:id/export", get(handlers::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::store::MemoryDocumentStore;

    const USER: &str = "ada@example.com";

    fn app() -> Router {
        build_router(AppState {
            store: Arc::new(MemoryDocumentStore::new()),
            config: Config::in_memory(),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-email", USER);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn valid_resume() -> Value {
        json!({
            "personalDetails": {
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "+44 20 7946 0958",
                "linkedin": "https://linkedin.com/in/ada"
            },
            "objective": "Write the **first** program",
            "education": [
                { "degree": "BA", "institution": "Home", "startDate": "1830" },
                { "degree": "MA", "institution": "London", "startDate": "1840" }
            ],
            "skills": [{ "category": "Math", "skills": "Analysis", "proficiency": "Advanced" }]
        })
    }

    async fn create(app: &Router, template: Option<&str>) -> String {
        let response = send(
            app,
            Method::POST,
            "/api/v1/resumes",
            Some(json!({ "resume": valid_resume(), "template": template })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "resumeitnow");
    }

    #[tokio::test]
    async fn test_wizard_steps_listed_in_order() {
        let response = send(&app(), Method::GET, "/api/v1/wizard/steps", None).await;
        let steps = body_json(response).await;
        let keys: Vec<&str> = steps
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[0], "personal_info");
        assert_eq!(keys[7], "certifications");
    }

    #[tokio::test]
    async fn test_validate_step_reports_field_errors() {
        let response = send(
            &app(),
            Method::POST,
            "/api/v1/wizard/steps/personal_info/validate",
            Some(json!({ "personalDetails": { "fullName": "", "email": "nope", "phone": "123" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        let paths: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["path"].as_str().unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                "personalDetails.fullName",
                "personalDetails.email",
                "personalDetails.phone"
            ]
        );
    }

    #[tokio::test]
    async fn test_validate_unknown_step_is_bad_request() {
        let response = send(
            &app(),
            Method::POST,
            "/api/v1/wizard/steps/hobbies/validate",
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wizard_advance_and_back() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/wizard/advance",
            Some(json!({ "fragment": { "personalDetails": valid_resume()["personalDetails"] } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["wizard"]["step"], "career_objective");
        assert_eq!(body["complete"], false);
        assert_eq!(body["wizard"]["draft"]["personalDetails"]["fullName"], "Ada Lovelace");

        let response = send(
            &app,
            Method::POST,
            "/api/v1/wizard/advance",
            Some(json!({ "wizard": body["wizard"], "direction": "back" })),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["wizard"]["step"], "personal_info");
    }

    #[tokio::test]
    async fn test_resume_routes_require_identity() {
        let response = app()
            .oneshot(Request::get("/api/v1/resumes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_resume() {
        let mut resume = valid_resume();
        resume["education"][1]["degree"] = json!("");
        let response = send(
            &app(),
            Method::POST,
            "/api/v1/resumes",
            Some(json!({ "resume": resume })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["fields"][0]["path"], "education.1.degree");
        assert_eq!(body["error"]["fields"][0]["message"], "Degree is required");
    }

    #[tokio::test]
    async fn test_create_get_list_delete() {
        let app = app();
        let id = create(&app, Some("minimal")).await;

        let body = body_json(send(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await).await;
        assert_eq!(body["template"], "minimal");
        assert_eq!(body["resume"]["education"][1]["degree"], "MA");

        let list = body_json(send(&app, Method::GET, "/api/v1/resumes", None).await).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], id.as_str());
        assert_eq!(list[0]["fullName"], "Ada Lovelace");

        let response = send(&app, Method::DELETE, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(&app, Method::DELETE, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_template_on_create_uses_default() {
        let app = app();
        let id = create(&app, Some("glitter")).await;
        let body = body_json(send(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await).await;
        assert_eq!(body["template"], "modern");
    }

    #[tokio::test]
    async fn test_patch_updates_one_entry_and_persists() {
        let app = app();
        let id = create(&app, None).await;
        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}"),
            Some(json!({
                "updates": [
                    { "section": "education", "index": 0, "field": "degree", "value": "BSc" },
                    { "section": "personalDetails", "field": "location", "value": "London" }
                ],
                "template": "professional"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(send(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await).await;
        assert_eq!(body["template"], "professional");
        assert_eq!(body["resume"]["education"][0]["degree"], "BSc");
        assert_eq!(body["resume"]["education"][1]["degree"], "MA");
        assert_eq!(body["resume"]["education"].as_array().unwrap().len(), 2);
        assert_eq!(body["resume"]["personalDetails"]["location"], "London");
        assert_eq!(body["resume"]["personalDetails"]["fullName"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_patch_with_bad_index_saves_nothing() {
        let app = app();
        let id = create(&app, None).await;
        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}"),
            Some(json!({
                "updates": [
                    { "section": "personalDetails", "field": "fullName", "value": "Changed" },
                    { "section": "education", "index": 5, "field": "degree", "value": "PhD" }
                ]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_EDIT");

        let body = body_json(send(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await).await;
        assert_eq!(body["resume"]["personalDetails"]["fullName"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_render_view_and_edit() {
        let app = app();
        let id = create(&app, None).await;

        let response = send(&app, Method::GET, &format!("/api/v1/resumes/{id}/render"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert!(html.contains("resume-modern"));
        assert!(html.contains("Write the <strong>first</strong> program"));

        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/resumes/{id}/render?mode=edit"),
            None,
        )
        .await;
        let html = body_text(response).await;
        assert!(html.contains("data-section=\"education\" data-field=\"degree\""));
    }

    #[tokio::test]
    async fn test_render_remembers_explicit_template() {
        let app = app();
        let id = create(&app, None).await;
        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/resumes/{id}/render?template=minimal"),
            None,
        )
        .await;
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("resumeitnow_template=minimal;"));
        assert!(body_text(response).await.contains("resume-minimal"));

        // Unknown template: current one stays, preference untouched.
        let request = Request::get(format!("/api/v1/resumes/{id}/render?template=neon"))
            .header("x-user-email", USER)
            .header(header::COOKIE, "resumeitnow_template=professional")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body_text(response).await.contains("resume-professional"));
    }

    #[tokio::test]
    async fn test_export_pdf() {
        let app = app();
        let id = create(&app, None).await;
        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/resumes/{id}/export?template=professional"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Ada Lovelace_"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_other_users_cannot_see_resume() {
        let app = app();
        let id = create(&app, None).await;
        let request = Request::get(format!("/api/v1/resumes/{id}"))
            .header("x-user-email", "mallory@example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
