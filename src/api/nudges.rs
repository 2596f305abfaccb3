//! Nudge API Endpoints
//!
//! Stored reminders the clients poll for and mark read. How a nudge is
//! surfaced is the client's concern.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, AppResult};
use crate::models::nudge::{CreateNudgeRequest, Nudge};

use super::{AppState, UserIdentity};

/// Create nudge API routes
pub fn create_nudge_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_nudges).post(add_nudge))
        .route("/:id/read", post(mark_read))
}

/// List nudges, newest first
async fn list_nudges(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Vec<Nudge>> {
    Json(state.storage.nudges(&user_id).await)
}

/// Add a nudge
async fn add_nudge(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Json(request): Json<CreateNudgeRequest>,
) -> AppResult<Json<Nudge>> {
    if request.message.trim().is_empty() {
        return Err(AppError::validation_error("Nudge message is required"));
    }
    Ok(Json(state.storage.add_nudge(&user_id, request).await))
}

/// Mark a nudge as read
async fn mark_read(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
) -> AppResult<Json<Nudge>> {
    state
        .storage
        .mark_nudge_read(&user_id, id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Nudge"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        InsightsAggregator, SessionClock, SessionStore, StatsStore, SystemTimeProvider,
        TimeProvider,
    };
    use crate::storage::MemoryStorage;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn test_server() -> TestServer {
        let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider::new());
        let insights = Arc::new(InsightsAggregator::new(
            Arc::new(StatsStore::new()),
            time_provider.clone(),
            chrono_tz::UTC,
        ));
        let state = AppState {
            sessions: Arc::new(SessionClock::new(
                Arc::new(SessionStore::new(10)),
                insights.clone(),
                time_provider.clone(),
            )),
            insights,
            storage: Arc::new(MemoryStorage::new(time_provider)),
        };
        let app = axum::Router::new()
            .nest("/api/nudges", create_nudge_routes())
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_nudges_are_listed_newest_first() {
        let server = test_server();

        let nudges: Value = server.get("/api/nudges").await.json();
        let entries = nudges.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["type"], "break_reminder");
        assert_eq!(entries[1]["type"], "focus_reminder");
        assert_eq!(entries[1]["message"], "Time for a focused work session!");
    }

    #[tokio::test]
    async fn test_create_requires_a_message() {
        let server = test_server();

        let response = server.post("/api/nudges").json(&json!({})).await;
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.json::<Value>()["error"], "ValidationError");
    }

    #[tokio::test]
    async fn test_create_defaults_to_focus_reminder() {
        let server = test_server();

        let response = server
            .post("/api/nudges")
            .json(&json!({ "message": "One more pomodoro before lunch" }))
            .await;
        assert_eq!(response.status_code(), 200);

        let nudge: Value = response.json();
        assert_eq!(nudge["type"], "focus_reminder");
        assert_eq!(nudge["isRead"], false);
    }

    #[tokio::test]
    async fn test_mark_read() {
        let server = test_server();

        let response = server.post("/api/nudges/1/read").await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<Value>()["isRead"], true);

        let response = server.post("/api/nudges/99/read").await;
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.json::<Value>()["error"], "NotFound");
    }
}
