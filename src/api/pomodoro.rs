//! Pomodoro API Endpoints
//!
//! REST surface over the session clock. The countdown itself runs in the
//! client; these endpoints only move the server-side state machine and
//! report its view of the session.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::session::{SessionKind, SessionView};

use super::{AppState, UserIdentity};

/// Create pomodoro API routes
pub fn create_pomodoro_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(current_session))
        .route("/start", post(start_session))
        .route("/pause", post(pause_session))
        .route("/resume", post(resume_session))
        .route("/complete", post(complete_session))
        .route("/stop", post(stop_session))
        .route("/history", get(session_history))
}

/// Body accepted by `POST /start`; both fields are optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub kind: Option<SessionKind>,
}

/// Response for a successful pause
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseResponse {
    pub paused_at: DateTime<Utc>,
}

/// Response for a successful resume
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub total_pause_minutes: f64,
}

/// Get the active session, or `null` when there is none
async fn current_session(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Option<SessionView>> {
    let current = state.sessions.current(&user_id).await;
    Json(current.map(|session| SessionView::from(&session)))
}

/// Start a new session
async fn start_session(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    body: Option<Json<StartSessionRequest>>,
) -> AppResult<Json<SessionView>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let session = state
        .sessions
        .start(&user_id, request.kind, request.duration_minutes)
        .await?;
    Ok(Json(SessionView::from(&session)))
}

/// Pause the active session
async fn pause_session(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> AppResult<Json<PauseResponse>> {
    let paused_at = state.sessions.pause(&user_id).await?;
    Ok(Json(PauseResponse { paused_at }))
}

/// Resume the paused session
async fn resume_session(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> AppResult<Json<ResumeResponse>> {
    let total_pause_minutes = state.sessions.resume(&user_id).await?;
    Ok(Json(ResumeResponse { total_pause_minutes }))
}

/// Finish the active session with full credit
async fn complete_session(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> AppResult<Json<SessionView>> {
    let session = state.sessions.complete(&user_id).await?;
    Ok(Json(SessionView::from(&session)))
}

/// Abandon the active session without credit
async fn stop_session(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> AppResult<Json<SessionView>> {
    let session = state.sessions.stop(&user_id).await?;
    Ok(Json(SessionView::from(&session)))
}

/// Archived sessions, oldest first
async fn session_history(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Vec<SessionView>> {
    let history = state.sessions.history(&user_id).await;
    Json(history.iter().map(SessionView::from).collect())
}
