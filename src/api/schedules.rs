//! Blocking Schedule API Endpoints
//!
//! Weekly enforcement windows for the distraction blocker. Validation
//! lives in the model; these handlers only translate outcomes to statuses.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::schedule::{BlockingSchedule, CreateScheduleRequest, UpdateScheduleRequest};

use super::{AppState, UserIdentity};

/// Create schedule API routes
pub fn create_schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schedules).post(add_schedule))
        .route("/:id", put(update_schedule).delete(remove_schedule))
}

/// List schedules, active or not
async fn list_schedules(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Vec<BlockingSchedule>> {
    Json(state.storage.blocking_schedules(&user_id).await)
}

/// Add a schedule
async fn add_schedule(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Json(request): Json<CreateScheduleRequest>,
) -> AppResult<Json<BlockingSchedule>> {
    let schedule = state.storage.add_schedule(&user_id, request).await?;
    Ok(Json(schedule))
}

/// Partially update a schedule
async fn update_schedule(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
    Json(request): Json<UpdateScheduleRequest>,
) -> AppResult<Json<BlockingSchedule>> {
    state
        .storage
        .update_schedule(&user_id, id, request)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Schedule"))
}

/// Remove a schedule
async fn remove_schedule(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    if state.storage.remove_schedule(&user_id, id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::not_found("Schedule"))
    }
}
