//! REST API endpoint handlers.
//!
//! One session per server process. The session mutex is only held for short
//! reads and writes, never across the remote call; an in-flight flag keeps a
//! second generation from starting while one is running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use postgen::error::PostError;
use postgen::export::export_post;
use postgen::generation::Generator;
use postgen::prompt::Platform;
use postgen::session::{SessionState, generate_post};
use postgen::ui::FormInput;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::preview::render_preview;
use crate::snapshot::SessionSnapshot;

/// The single-page form.
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<SessionState>>,
    pub generator: Arc<dyn Generator>,
    pub temperature: f32,
    pub in_flight: Arc<AtomicBool>,
}

impl AppState {
    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clears the in-flight flag when the request finishes, however it ends.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Errors ───────────────────────────────────────────────────────────

/// Handler error, rendered as `{"error": ..., "kind": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Post(PostError),
    /// A generation is already running for this session.
    Busy,
}

impl From<PostError> for ApiError {
    fn from(e: PostError) -> Self {
        ApiError::Post(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, error) = match self {
            ApiError::Post(e @ PostError::InvalidInput(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", e.to_string())
            }
            ApiError::Post(e @ PostError::UnsupportedPlatform(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unsupported_platform",
                e.to_string(),
            ),
            ApiError::Post(e @ PostError::Generation(_)) => {
                (StatusCode::BAD_GATEWAY, "generation", e.to_string())
            }
            ApiError::Busy => (
                StatusCode::CONFLICT,
                "busy",
                "a post is already being generated".to_string(),
            ),
        };
        (status, Json(ErrorBody { error, kind })).into_response()
    }
}

// ── Handlers ─────────────────────────────────────────────────────────

/// GET / — The form page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/state — Session snapshot plus form limits.
pub async fn get_state(State(app): State<AppState>) -> Json<SessionSnapshot> {
    let generating = app.in_flight.load(Ordering::Acquire);
    let state = app.session();
    Json(SessionSnapshot::capture(&state, generating))
}

/// Response body for POST /api/generate.
#[derive(Serialize, Deserialize, Debug)]
pub struct GenerateResponse {
    pub post: String,
    pub preview_html: String,
}

/// POST /api/generate — Validate the form and generate a post.
///
/// Returns 200 with the new post, 422 for invalid input, 502 when the model
/// call fails (the previous post stays in the session), and 409 while another
/// generation is running.
pub async fn post_generate(
    State(app): State<AppState>,
    Json(input): Json<FormInput>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = input.into_request().inspect_err(|e| {
        warn!("rejected form input: {e}");
    })?;

    let Some(_guard) = InFlightGuard::acquire(&app.in_flight) else {
        debug!("generation already in flight");
        return Err(ApiError::Busy);
    };

    let post = generate_post(app.generator.as_ref(), &request, app.temperature).await?;
    app.session().set(post.clone());
    let preview_html = render_preview(&post);
    Ok(Json(GenerateResponse { post, preview_html }))
}

/// Request body for POST /api/export.
#[derive(Deserialize, Debug)]
pub struct ExportRequest {
    pub platform: String,
    /// Edited editor content. Falls back to the session's post.
    #[serde(default)]
    pub text: Option<String>,
}

/// POST /api/export — Download the post as `post-<Platform>.txt`.
///
/// Returns 422 when there is nothing to export or the platform is unknown.
pub async fn post_export(
    State(app): State<AppState>,
    Json(body): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let platform: Platform = body.platform.parse()?;
    let text = match body.text {
        Some(t) => t,
        None => app.session().get().to_string(),
    };
    let export = export_post(&text, platform)?;

    let headers = [
        (
            header::CONTENT_TYPE,
            format!("{}; charset=utf-8", export.mime),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_request_text_is_optional() {
        let req: ExportRequest = serde_json::from_str(r#"{"platform":"Facebook"}"#).unwrap();
        assert_eq!(req.platform, "Facebook");
        assert!(req.text.is_none());
    }

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (ApiError::from(PostError::InvalidInput("x".into())), 422),
            (ApiError::from(PostError::UnsupportedPlatform("x".into())), 422),
            (ApiError::from(PostError::Generation("x".into())), 502),
            (ApiError::Busy, 409),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }

    #[test]
    fn in_flight_guard_is_exclusive() {
        let flag = Arc::new(AtomicBool::new(false));
        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());
        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }
}
