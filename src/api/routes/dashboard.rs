//! Dashboard Routes
//!
//! Server-rendered page. Every request is one render cycle: a fresh seed,
//! fresh metrics, and the session's form state.
//!
//! - GET / - Render the dashboard
//! - POST /feedback - Store feedback and render the acknowledgment
//! - GET /style.css - Static style sheet

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Local;
use std::sync::Arc;

use crate::api::cookie::{session_from_headers, with_session_cookie};
use crate::api::dto::FeedbackForm;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::metrics::{draw_metrics, NightlyMetrics};
use crate::session::{Feedback, DEFAULT_QUALITY};
use crate::ui::{render_page, FormValues, PageView, APP_CSS};

/// GET /
pub async fn show_dashboard(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let presented = session_from_headers(&headers);
    let (session_id, created) = state.sessions.resolve(presented.as_deref()).await;

    let metrics = draw_metrics();
    let form = FormValues::defaults(&metrics);
    let page = render(&state, &metrics, form, None);

    with_session_cookie(Html(page).into_response(), &session_id, created)
}

/// POST /feedback
///
/// Overwrites the session's `last_feedback` entry. Missing or unparsable
/// fields fall back to the widget defaults; out-of-range values are clamped.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<FeedbackForm>,
) -> ApiResult<Response> {
    let metrics = draw_metrics();
    let feedback = Feedback::new(
        form.quality().unwrap_or(i64::from(DEFAULT_QUALITY)),
        form.duration().unwrap_or(metrics.total_sleep_hours),
        form.notes(),
    );

    let presented = session_from_headers(&headers);
    let (session_id, created, written) = state
        .sessions
        .resolve_with(presented.as_deref(), |s| s.set_last_feedback(&feedback))
        .await;
    written?;

    tracing::info!(
        session_id = %session_id,
        quality = feedback.quality,
        duration = feedback.duration,
        "Feedback received"
    );

    let page = render(&state, &metrics, FormValues::from(&feedback), Some(&feedback));
    Ok(with_session_cookie(
        Html(page).into_response(),
        &session_id,
        created,
    ))
}

/// GET /style.css
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

fn render(
    state: &AppState,
    metrics: &NightlyMetrics,
    form: FormValues,
    acknowledgment: Option<&Feedback>,
) -> String {
    render_page(&PageView {
        title: &state.server.page_title,
        wide: state.server.is_wide(),
        now: Local::now(),
        metrics,
        form,
        acknowledgment,
    })
}
