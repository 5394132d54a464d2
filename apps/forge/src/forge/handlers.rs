//! Axum route handlers for the forge page and the JSON forge API.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::forge::generator::{apply_outcome, forge_bullets};
use crate::forge::options::{ChoiceSet, ModelId, QuantifyPreference, Seniority, Tone};
use crate::forge::request::{ForgeForm, ForgeRequest};
use crate::session::{SessionId, SessionState};
use crate::state::AppState;
use crate::ui::{render_page, PageView};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ForgeApiResponse {
    pub original: String,
    pub forged: String,
    pub model: ModelId,
}

#[derive(Debug, Serialize)]
pub struct ChoiceList {
    pub choices: Vec<&'static str>,
    pub default: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub seniority: ChoiceList,
    pub tone: ChoiceList,
    pub model: ChoiceList,
    pub quantify_pref: ChoiceList,
}

fn choice_list<T: ChoiceSet>() -> ChoiceList {
    ChoiceList {
        choices: T::all().iter().map(|c| c.label()).collect(),
        default: T::default().label(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// Paints the page for the caller's session. A visitor without a live
/// session gets a blank page; the session starts on their first submit.
pub async fn handle_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let id = state.sessions.resume(SessionId::from_headers(&headers));
    render_session_page(&state, id, false, None).await
}

/// POST /forge
///
/// One submit: remember the inputs, run the forge, paint the outcome.
pub async fn handle_forge_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ForgeForm>,
) -> Response {
    let (id, created) = state.sessions.open(SessionId::from_headers(&headers));

    let credential = form.credential();
    let request = match ForgeRequest::from_form(&form) {
        Ok(request) => request,
        Err(err) => {
            warn!("Rejected forge form: {err}");
            let message = err.to_string();
            return render_session_page(&state, Some(id), created, Some(&message)).await;
        }
    };

    state.sessions.with_session(id, |session| {
        session.api_key = credential;
        session.last_request = request.clone();
    });

    let api_key = state.sessions.credential(id);
    let outcome = forge_bullets(state.capability.as_ref(), api_key.as_ref(), &request).await;
    let error = state
        .sessions
        .with_session(id, |session| apply_outcome(session, outcome))
        .flatten();

    render_session_page(&state, Some(id), created, error.as_deref()).await
}

/// POST /session/reset
///
/// Ends the caller's session and sends them back to a blank page.
pub async fn handle_reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = SessionId::from_headers(&headers) {
        state.sessions.end(id);
    }
    (
        [(header::SET_COOKIE, SessionId::expired_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// JSON handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/forge
///
/// Stateless forge: the key comes with the request and nothing is kept.
/// Takes the same fields as the HTML form; choices use their display labels.
pub async fn handle_forge_json(
    State(state): State<AppState>,
    Json(form): Json<ForgeForm>,
) -> Result<Json<ForgeApiResponse>, AppError> {
    let request = ForgeRequest::from_form(&form)?;
    let credential = form.credential();

    let forged = forge_bullets(state.capability.as_ref(), credential.as_ref(), &request).await?;

    Ok(Json(ForgeApiResponse {
        original: request.bullets,
        forged,
        model: request.model,
    }))
}

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        seniority: choice_list::<Seniority>(),
        tone: choice_list::<Tone>(),
        model: choice_list::<ModelId>(),
        quantify_pref: choice_list::<QuantifyPreference>(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

const NO_STORE: &str = "no-store";

/// Renders the page for `session` (blank when `None`).
///
/// The page carries the session's key, so it is always sent `no-store`.
async fn render_session_page(
    state: &AppState,
    session: Option<SessionId>,
    set_cookie: bool,
    error: Option<&str>,
) -> Response {
    let logo_available = tokio::fs::metadata(&state.config.logo_path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    let logo_name = state
        .config
        .logo_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| state.config.logo_path.display().to_string());

    let logo = logo_available.then_some(logo_name.as_str());

    let paint = |live: Option<&SessionState>| {
        let fallback = ForgeRequest::default();
        render_page(&PageView {
            api_key: live.and_then(|s| s.api_key.as_ref()),
            request: live.map_or(&fallback, |s| &s.last_request),
            last_output: live.and_then(|s| s.last_output.as_deref()),
            error,
            logo_name: logo,
            missing_logo_name: &logo_name,
        })
    };

    // The session can vanish between open and paint if a reset races us.
    let html = session
        .and_then(|id| state.sessions.with_session(id, |s| paint(Some(&*s))))
        .unwrap_or_else(|| paint(None));

    match session.filter(|_| set_cookie) {
        Some(id) => (
            [
                (header::CACHE_CONTROL, NO_STORE.to_string()),
                (header::SET_COOKIE, id.cookie()),
            ],
            Html(html),
        )
            .into_response(),
        None => ([(header::CACHE_CONTROL, NO_STORE)], Html(html)).into_response(),
    }
}
