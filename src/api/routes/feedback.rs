//! Feedback Routes
//!
//! JSON access to the current session's `last_feedback` entry.
//!
//! - GET /api/v1/feedback - Last feedback submitted in this session
//! - POST /api/v1/feedback - Submit feedback

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::cookie::{session_from_headers, with_session_cookie};
use crate::api::dto::{FeedbackRequest, FeedbackResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::session::Feedback;

/// GET /api/v1/feedback
pub async fn get_feedback(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let presented = session_from_headers(&headers);
    let (session_id, created, stored) = state
        .sessions
        .resolve_with(presented.as_deref(), |s| s.last_feedback())
        .await;

    let result = stored
        .map_err(ApiError::from)
        .and_then(|feedback| {
            feedback.ok_or_else(|| {
                ApiError::NotFound("No feedback submitted in this session".to_string())
            })
        })
        .map(|feedback| Json(feedback).into_response());

    with_session_cookie(into_response(result), &session_id, created)
}

/// POST /api/v1/feedback
///
/// Non-finite durations never get here: JSON has no literal for them and the
/// extractor rejects overflowing numbers such as `1e400`.
pub async fn post_feedback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<FeedbackRequest>,
) -> Response {
    let feedback = Feedback::new(req.quality, req.duration, req.notes);

    let presented = session_from_headers(&headers);
    let (session_id, created, written) = state
        .sessions
        .resolve_with(presented.as_deref(), |s| s.set_last_feedback(&feedback))
        .await;

    let result = written.map_err(ApiError::from).map(|()| {
        tracing::info!(
            session_id = %session_id,
            quality = feedback.quality,
            duration = feedback.duration,
            "Feedback received via API"
        );

        let body = FeedbackResponse {
            status: "ok".to_string(),
            feedback,
        };
        (StatusCode::CREATED, Json(body)).into_response()
    });

    with_session_cookie(into_response(result), &session_id, created)
}

fn into_response(result: ApiResult<Response>) -> Response {
    result.unwrap_or_else(IntoResponse::into_response)
}
