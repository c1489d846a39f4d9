pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contact::{analytics, handlers as contact};
use crate::content::handlers as content;
use crate::realtime::stream;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sections
        .route("/api/v1/portfolio", get(content::handle_portfolio))
        .route("/api/v1/hero", get(content::handle_hero))
        .route("/api/v1/hero/frame", get(content::handle_hero_frame))
        .route("/api/v1/behavior", get(content::handle_behavior))
        .route("/api/v1/projects", get(content::handle_projects))
        .route("/api/v1/certificates", get(content::handle_certificates))
        .route("/api/v1/certificates/:id", get(content::handle_certificate))
        .route("/api/v1/experience", get(content::handle_experience))
        .route("/api/v1/education", get(content::handle_education))
        .route("/api/v1/skills", get(content::handle_skills))
        .route("/api/v1/tools", get(content::handle_tools))
        // Writes
        .route("/api/v1/contact", post(contact::handle_submit))
        .route("/api/v1/analytics", post(analytics::handle_track))
        // Push subscription
        .route("/api/v1/realtime/:table", get(stream::handle_subscribe))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::backend::Backend;
    use crate::models::content::fixtures::{certificate, experience, project};
    use crate::models::profile::Profile;

    fn test_state() -> AppState {
        AppState::new(Backend::unavailable(), Profile::embedded().unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_reports_fallback_backend() {
        let (status, body) = get_json(build_router(test_state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "fallback");
        assert_eq!(body["realtime"], "disconnected");
    }

    #[tokio::test]
    async fn test_health_reports_live_feed() {
        let state = test_state();
        state.hub.set_connected(true);
        let (_, body) = get_json(build_router(state), "/health").await;
        assert_eq!(body["realtime"], "connected");
    }

    #[tokio::test]
    async fn test_empty_sections_without_backend() {
        let app = build_router(test_state());
        for uri in ["/api/v1/projects", "/api/v1/certificates", "/api/v1/experience"] {
            let (status, body) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, Value::Array(vec![]), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_portfolio_document_has_every_section() {
        let state = test_state();
        state.store.projects.replace(vec![project(1, true)]).await;
        state.store.experience.replace(vec![experience(0, 2022)]).await;

        let (status, body) = get_json(build_router(state), "/api/v1/portfolio").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hero"]["resume_url"], "/resume.png");
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);
        assert_eq!(body["experience"][0]["period"], "2022 - Present");
        assert!(!body["education"].as_array().unwrap().is_empty());
        assert!(body["tools"][0]["orbit"]["x"].is_number());
        assert_eq!(body["behavior"]["status_reset_ms"], 5000);
    }

    #[tokio::test]
    async fn test_hero_frame_and_behavior() {
        let app = build_router(test_state());
        let (status, body) =
            get_json(app.clone(), "/api/v1/hero/frame?elapsed_ms=0&progress=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phrase_index"], 0);
        assert_eq!(body["typed"], "");
        assert_eq!(body["phase"], "typing");
        assert_eq!(body["parallax"]["hero_opacity"], 0.0);

        let (status, body) = get_json(app, "/api/v1/behavior").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phrase_interval_ms"], 4000);
        assert_eq!(body["sections"][0], "home");
    }

    #[tokio::test]
    async fn test_certificate_lookup() {
        let state = test_state();
        let certs = vec![certificate(0), certificate(1), certificate(2)];
        let ids: Vec<String> = certs.iter().map(|c| c.id.to_string()).collect();
        state.store.certificates.replace(certs).await;
        let app = build_router(state);

        let uri = format!("/api/v1/certificates/{}", ids[2]);
        let (status, body) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["index"], 2);
        assert_eq!(body["total"], 3);
        assert_eq!(body["position"], "3 / 3");
        assert_eq!(body["prev_id"], ids[1].as_str());
        // wraps back to the first certificate
        assert_eq!(body["next_id"], ids[0].as_str());

        let missing = uuid::Uuid::new_v4();
        let (status, body) = get_json(app, &format!("/api/v1/certificates/{missing}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_contact_rejects_invalid_form() {
        let (status, body) = post_json(
            build_router(test_state()),
            "/api/v1/contact",
            serde_json::json!({ "name": "A", "email": "bad", "subject": "", "message": "hello there, friend" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields = &body["error"]["fields"];
        assert_eq!(fields["name"], "Name must be at least 2 characters");
        assert_eq!(fields["email"], "Please enter a valid email address");
        assert_eq!(fields["subject"], "Subject is required");
        assert!(fields.get("message").is_none());
    }

    #[tokio::test]
    async fn test_contact_without_backend_asks_to_retry() {
        let (status, body) = post_json(
            build_router(test_state()),
            "/api/v1/contact",
            serde_json::json!({
                "name": "Sam",
                "email": "sam@example.com",
                "subject": "Hello there",
                "message": "Would love to collaborate on something."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_analytics_is_accepted_even_without_backend() {
        let (status, _) = post_json(
            build_router(test_state()),
            "/api/v1/analytics",
            serde_json::json!({ "event_type": "section_view", "page_url": "/experience" }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_realtime_rejects_unknown_table() {
        let (status, body) = get_json(build_router(test_state()), "/api/v1/realtime/contact_messages").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_realtime_stream_opens_for_known_table() {
        let resp = build_router(test_state())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/realtime/certificates")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-type"].to_str().unwrap(),
            "text/event-stream"
        );
    }
}
