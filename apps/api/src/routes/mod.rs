pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::import::handlers as import;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume state
        .route("/api/v1/resume", get(store::handle_get_resume))
        .route("/api/v1/resume/actions", post(store::handle_dispatch))
        .route("/api/v1/wizard/step", put(store::handle_set_step))
        .route(
            "/api/v1/resume/work-experience",
            post(store::handle_create_work_experience),
        )
        .route(
            "/api/v1/resume/work-experience/:id",
            patch(store::handle_edit_work_experience),
        )
        // Import
        .route("/api/v1/import/preview", post(import::handle_import_preview))
        .route("/api/v1/import", post(import::handle_import))
        // Preview and export
        .route("/api/v1/preview", get(render::handle_preview))
        .route("/api/v1/export", get(export::handle_export))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::export::FontDatabase;
    use crate::import::extract::tests::docx_with_paragraphs;
    use crate::import::MIME_DOCX;
    use crate::store::storage::MemoryStorage;
    use crate::store::ResumeStore;

    const BOUNDARY: &str = "resume-builder-test-boundary";

    async fn test_state() -> AppState {
        test_state_with_upload_limit(1024 * 1024).await
    }

    async fn test_state_with_upload_limit(max_upload_bytes: usize) -> AppState {
        let store = ResumeStore::load(Arc::new(MemoryStorage::new())).await;
        AppState {
            store: Arc::new(RwLock::new(store)),
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                data_dir: PathBuf::from("."),
                max_upload_bytes,
                font_dir: None,
            },
            fonts: Arc::new(FontDatabase::new()),
        }
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Vec<u8>, header::HeaderMap) {
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), headers)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload(uri: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn parse(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Health and state
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let state = test_state().await;
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_resume_includes_wizard_steps() {
        let state = test_state().await;
        let request = Request::get("/api/v1/resume").body(Body::empty()).unwrap();
        let (status, body, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        let value = parse(&body);
        assert_eq!(value["currentStep"], 0);
        assert_eq!(value["steps"].as_array().unwrap().len(), 6);
        assert_eq!(value["resume"]["template"], "minimal");
        assert_eq!(
            value["templates"],
            json!(["minimal", "professional", "creative", "modern"])
        );
    }

    #[tokio::test]
    async fn test_dispatch_set_template() {
        let state = test_state().await;
        let request = json_request(
            "POST",
            "/api/v1/resume/actions",
            json!({"type": "SET_TEMPLATE", "payload": "creative"}),
        );
        let (status, body, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse(&body)["template"], "creative");
    }

    #[tokio::test]
    async fn test_duplicate_add_is_conflict() {
        let state = test_state().await;
        let skill = json!({
            "type": "ADD_SKILL",
            "payload": {"id": "6f1c2b1e-8a47-4a7e-9d0f-2f0f2b7c1a11", "name": "Rust", "level": 4}
        });

        let (status, _, _) = send(&state, json_request("POST", "/api/v1/resume/actions", skill.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body, _) = send(&state, json_request("POST", "/api/v1/resume/actions", skill)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(parse(&body)["error"]["code"], "CONFLICT");
        assert_eq!(state.store.read().await.resume().skills.len(), 1);
    }

    #[tokio::test]
    async fn test_set_step_out_of_range() {
        let state = test_state().await;
        let (status, body, _) = send(&state, json_request("PUT", "/api/v1/wizard/step", json!({"step": 9}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse(&body)["error"]["code"], "VALIDATION_ERROR");

        let (status, body, _) = send(&state, json_request("PUT", "/api/v1/wizard/step", json!({"step": 3}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse(&body)["currentStep"], 3);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Work-experience edit form
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_work_experience_requires_fields() {
        let state = test_state().await;
        let request = json_request(
            "POST",
            "/api/v1/resume/work-experience",
            json!({"position": "Engineer"}),
        );
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.store.read().await.resume().work_experience.is_empty());
    }

    #[tokio::test]
    async fn test_marking_current_clears_end_date() {
        let state = test_state().await;
        let request = json_request(
            "POST",
            "/api/v1/resume/work-experience",
            json!({
                "company": "Acme",
                "position": "Engineer",
                "startDate": "2020-01-01",
                "endDate": "2022-06-30"
            }),
        );
        let (status, body, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        let id = parse(&body)["workExperience"][0]["id"].as_str().unwrap().to_string();

        let request = json_request(
            "PATCH",
            &format!("/api/v1/resume/work-experience/{id}"),
            json!({"current": true}),
        );
        let (status, body, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        let item = &parse(&body)["workExperience"][0];
        assert_eq!(item["current"], true);
        assert_eq!(item["endDate"], "");
    }

    #[tokio::test]
    async fn test_edit_unknown_work_experience_is_not_found() {
        let state = test_state().await;
        let request = json_request(
            "PATCH",
            "/api/v1/resume/work-experience/6f1c2b1e-8a47-4a7e-9d0f-2f0f2b7c1a11",
            json!({"company": "Acme"}),
        );
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Import
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_import_rejects_unsupported_type() {
        let state = test_state().await;
        let (status, body, _) = send(&state, upload("/api/v1/import/preview", "image/png", b"\x89PNG")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(parse(&body)["error"]["code"], "UNSUPPORTED_FILE_TYPE");
    }

    #[tokio::test]
    async fn test_import_over_upload_limit_is_payload_too_large() {
        let state = test_state_with_upload_limit(1024).await;
        let oversized = vec![b'x'; 4096];
        let (status, body, _) = send(&state, upload("/api/v1/import", MIME_DOCX, &oversized)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(parse(&body)["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(state.store.read().await.resume().is_blank());
    }

    #[tokio::test]
    async fn test_import_preview_leaves_store_untouched() {
        let state = test_state().await;
        let before = state.store.read().await.resume().clone();
        let docx = docx_with_paragraphs(&["Jane Doe", "jane@example.com"]);

        let (status, body, _) = send(&state, upload("/api/v1/import/preview", MIME_DOCX, &docx)).await;
        assert_eq!(status, StatusCode::OK);
        let value = parse(&body);
        assert_eq!(value["applied"], false);
        assert_eq!(value["detected"]["email"], true);
        assert_eq!(value["resume"]["personalInfo"]["firstName"], "Jane");
        assert_eq!(state.store.read().await.resume(), &before);
    }

    #[tokio::test]
    async fn test_import_replaces_current_resume() {
        let state = test_state().await;
        let docx = docx_with_paragraphs(&["Jane Doe", "Skills: Rust, SQL"]);

        let (status, body, _) = send(&state, upload("/api/v1/import", MIME_DOCX, &docx)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse(&body)["applied"], true);

        let store = state.store.read().await;
        assert_eq!(store.resume().personal_info.last_name, "Doe");
        assert_eq!(store.resume().skills.len(), 1);
    }

    #[tokio::test]
    async fn test_import_malformed_file_is_parse_failure() {
        let state = test_state().await;
        let (status, body, _) = send(&state, upload("/api/v1/import", MIME_DOCX, b"not a zip")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(parse(&body)["error"]["code"], "PARSE_FAILURE");
    }

    // ────────────────────────────────────────────────────────────────────────
    // Preview and export
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_preview_returns_svg() {
        let state = test_state().await;
        let request = Request::get("/api/v1/preview?template=modern&scale=0.5")
            .body(Body::empty())
            .unwrap();
        let (status, body, headers) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
        let svg = String::from_utf8(body).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("scale(0.5)"));
    }

    #[tokio::test]
    async fn test_preview_rejects_bad_scale() {
        let state = test_state().await;
        let request = Request::get("/api/v1/preview?scale=-1").body(Body::empty()).unwrap();
        let (status, _, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let state = test_state().await;
        let rename = json_request(
            "POST",
            "/api/v1/resume/actions",
            json!({"type": "SET_PERSONAL_INFO", "payload": {"firstName": "Jane", "lastName": "Doe"}}),
        );
        send(&state, rename).await;

        let request = Request::get("/api/v1/export?template=professional")
            .body(Body::empty())
            .unwrap();
        let (status, body, headers) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Doe_Resume.pdf\""
        );
        assert_eq!(headers["x-page-count"], "1");
        assert!(body.starts_with(b"%PDF-"));
    }
}
