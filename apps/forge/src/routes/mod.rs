pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeFile;

use crate::forge::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let logo = ServeFile::new(&state.config.logo_path);

    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(handlers::handle_page))
        .route("/forge", post(handlers::handle_forge_submit))
        .route("/session/reset", post(handlers::handle_reset))
        .route_service("/assets/logo", logo)
        // JSON API
        .route("/api/v1/forge", post(handlers::handle_forge_json))
        .route("/api/v1/options", get(handlers::handle_options))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::testing::{FakeCapability, FakeReply};
    use crate::session::SessionStore;

    fn app_with(fake: &FakeCapability, config: Config) -> Router {
        app_sharing(fake, config, SessionStore::new(Duration::from_secs(600)))
    }

    fn app_sharing(fake: &FakeCapability, config: Config, sessions: SessionStore) -> Router {
        build_router(AppState {
            config,
            capability: Arc::new(fake.clone()),
            sessions,
        })
    }

    fn app(fake: &FakeCapability) -> Router {
        let config = Config {
            logo_path: "/nonexistent/aza_labs.png".into(),
            ..Config::default()
        };
        app_with(fake, config)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    fn get_page(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn submit_as(cookie: Option<&str>, form: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/forge")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(form.to_string())).unwrap()
    }

    fn submit(cookie: &str, form: &str) -> Request<Body> {
        submit_as(Some(cookie), form)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Starts a session with an empty first submit and returns its cookie pair.
    async fn start_session(app: &Router) -> String {
        let response = app.clone().oneshot(submit_as(None, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let fake = FakeCapability::replying("unused");
        let response = app(&fake)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "bullet-forge");
    }

    #[tokio::test]
    async fn test_first_visit_renders_idle_page_without_session() {
        let fake = FakeCapability::replying("unused");
        let sessions = SessionStore::new(Duration::from_secs(600));
        let app = app_sharing(&fake, Config::default(), sessions.clone());

        for _ in 0..3 {
            let response = app.clone().oneshot(get_page(None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(header::SET_COOKIE).is_none());
            let html = body_text(response).await;
            assert!(html.contains("🔥 Forge bullets"));
            assert!(!html.contains(r#"role="alert""#));
        }
        assert_eq!(sessions.len(), 0);

        let response = app.oneshot(submit_as(None, "")).await.unwrap();
        assert!(session_cookie(&response).starts_with("forge_session="));
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_pages_echoing_the_key_are_not_cached() {
        let fake = FakeCapability::replying("1. Forged");
        let app = app(&fake);
        let cookie = start_session(&app).await;

        let response = app
            .clone()
            .oneshot(submit(&cookie, "api_key=sk-cache-secret&bullets=x"))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

        let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
        let html = body_text(response).await;
        assert!(html.contains(r#"value="sk-cache-secret""#));
    }

    #[tokio::test]
    async fn test_submit_without_key_shows_missing_credential() {
        let fake = FakeCapability::replying("1. Forged");
        let app = app(&fake);
        let cookie = start_session(&app).await;

        let response = app.oneshot(submit(&cookie, "api_key=&bullets=x")).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Please paste your OpenAI API key to continue."));
        assert_eq!(fake.connect_count(), 0);
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_without_bullets_shows_missing_input() {
        let fake = FakeCapability::replying("1. Forged");
        let app = app(&fake);
        let cookie = start_session(&app).await;

        let response = app
            .oneshot(submit(&cookie, "api_key=sk-test&bullets=+++"))
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Please paste at least one existing bullet point."));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_forge_renders_both_panels_and_persists() {
        let fake = FakeCapability::replying("1. Led a team of 4 engineers shipping 3 releases");
        let app = app(&fake);
        let cookie = start_session(&app).await;

        let form = "api_key=sk-test&job_title=&seniority=Senior&tone=Bold&industry=\
                    &bullets=Led+a+team&model=gpt-4o&quantify_pref=Light+touch+%28minimal+changes%29";
        let response = app.clone().oneshot(submit(&cookie, form)).await.unwrap();
        let html = body_text(response).await;

        assert!(html.contains(r#"<div class="result-label">Original</div>"#));
        assert!(html.contains("1. Led a team of 4 engineers shipping 3 releases"));
        assert!(html.contains(r#"<option value="Bold" selected>"#));

        let sent = fake.last_request().unwrap();
        assert_eq!(sent.model, "gpt-4o");
        assert!(sent.user.contains("Target role: Not specified"));

        // Next paint of the same session still shows the result.
        let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("1. Led a team of 4 engineers shipping 3 releases"));
        assert!(html.contains("Led a team</div>"));
    }

    #[tokio::test]
    async fn test_failed_forge_keeps_previous_result() {
        let fake = FakeCapability::replying("1. First result");
        let app = app(&fake);
        let cookie = start_session(&app).await;

        app.clone()
            .oneshot(submit(&cookie, "api_key=sk-test&bullets=Led+a+team"))
            .await
            .unwrap();

        fake.set_reply(FakeReply::NetworkError("simulated network error".to_string()));
        let response = app
            .oneshot(submit(&cookie, "api_key=sk-test&bullets=Led+a+team"))
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Something went wrong while calling OpenAI"));
        assert!(html.contains("simulated network error"));
        assert!(html.contains("1. First result"));
    }

    #[tokio::test]
    async fn test_sessions_do_not_leak_into_each_other() {
        let fake = FakeCapability::replying("1. Private result");
        let app = app(&fake);
        let alice = start_session(&app).await;
        let bob = start_session(&app).await;
        assert_ne!(alice, bob);

        app.clone()
            .oneshot(submit(&alice, "api_key=sk-alice-secret&bullets=Led+a+team"))
            .await
            .unwrap();

        let response = app.oneshot(get_page(Some(&bob))).await.unwrap();
        let html = body_text(response).await;
        assert!(!html.contains("1. Private result"));
        assert!(!html.contains("sk-alice-secret"));
    }

    #[tokio::test]
    async fn test_unknown_choice_is_reported_without_calling() {
        let fake = FakeCapability::replying("1. Forged");
        let app = app(&fake);
        let cookie = start_session(&app).await;

        let response = app
            .oneshot(submit(&cookie, "api_key=sk-test&bullets=x&tone=Sarcastic"))
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("&#39;Sarcastic&#39; is not a valid tone"));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_forgets_key_and_result() {
        let fake = FakeCapability::replying("1. Forged");
        let app = app(&fake);
        let cookie = start_session(&app).await;
        app.clone()
            .oneshot(submit(&cookie, "api_key=sk-test&bullets=x"))
            .await
            .unwrap();

        let reset = Request::builder()
            .method("POST")
            .uri("/session/reset")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(reset).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .contains("Max-Age=0"));

        // The old cookie no longer maps to anything: the page comes back blank.
        let response = app.oneshot(get_page(Some(&cookie))).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert!(!html.contains("1. Forged"));
        assert!(!html.contains(r#"value="sk-test""#));
    }

    #[tokio::test]
    async fn test_capability_unavailable_is_shown_inline() {
        let fake = FakeCapability::unavailable();
        let app = app(&fake);
        let cookie = start_session(&app).await;

        let response = app
            .oneshot(submit(&cookie, "api_key=sk-test&bullets=x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("The OpenAI client is not available in this build."));
    }

    #[tokio::test]
    async fn test_logo_served_and_shown_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brand.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nfake").unwrap();
        let config = Config {
            logo_path: path,
            ..Config::default()
        };
        let fake = FakeCapability::replying("unused");
        let app = app_with(&fake, config);

        let html = body_text(app.clone().oneshot(get_page(None)).await.unwrap()).await;
        assert!(html.contains(r#"<img src="/assets/logo" alt="brand.png""#));

        let response = app
            .oneshot(Request::builder().uri("/assets/logo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_logo_asset_is_not_found() {
        let fake = FakeCapability::replying("unused");
        let response = app(&fake)
            .oneshot(Request::builder().uri("/assets/logo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_json_forge_success() {
        let fake = FakeCapability::replying(" 1. Forged via API ");
        let response = app(&fake)
            .oneshot(post_json(
                "/api/v1/forge",
                json!({
                    "api_key": "sk-test",
                    "bullets": "Led a team",
                    "model": "gpt-4.1-mini",
                    "quantify_pref": "Aggressively add metrics"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["original"], "Led a team");
        assert_eq!(body["forged"], "1. Forged via API");
        assert_eq!(body["model"], "gpt-4.1-mini");
    }

    #[tokio::test]
    async fn test_json_forge_missing_credential_envelope() {
        let fake = FakeCapability::replying("unused");
        let response = app(&fake)
            .oneshot(post_json("/api/v1/forge", json!({"bullets": "x"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_json_forge_remote_failure_is_bad_gateway() {
        let fake = FakeCapability::failing("simulated network error");
        let response = app(&fake)
            .oneshot(post_json(
                "/api/v1/forge",
                json!({"api_key": "sk-test", "bullets": "Led a team"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("simulated network error"));
    }

    #[tokio::test]
    async fn test_json_forge_unknown_choice_is_validation_error() {
        let fake = FakeCapability::replying("unused");
        let response = app(&fake)
            .oneshot(post_json(
                "/api/v1/forge",
                json!({"api_key": "sk-test", "bullets": "x", "seniority": "Intern"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_options_lists_choices_and_defaults() {
        let fake = FakeCapability::replying("unused");
        let response = app(&fake)
            .oneshot(Request::builder().uri("/api/v1/options").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["seniority"]["default"], "Senior");
        assert_eq!(body["model"]["choices"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["quantify_pref"]["choices"][2],
            "Light touch (minimal changes)"
        );
    }
}
