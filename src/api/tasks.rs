//! Task API Endpoints
//!
//! CRUD for the daily planner shown next to the timer. Deleting only
//! deactivates; the listing filters on the active flag.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::task::{CreateTaskRequest, Task, UpdateTaskRequest};

use super::{AppState, UserIdentity};

/// Create task API routes
pub fn create_task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(add_task))
        .route("/:id", put(update_task).delete(remove_task))
}

/// List active tasks
async fn list_tasks(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Vec<Task>> {
    Json(state.storage.tasks(&user_id).await)
}

/// Add a task
async fn add_task(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Json(request): Json<CreateTaskRequest>,
) -> AppResult<Json<Task>> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation_error("Task title is required"));
    }
    Ok(Json(state.storage.add_task(&user_id, request).await))
}

/// Partially update a task
async fn update_task(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
    Json(request): Json<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    state
        .storage
        .update_task(&user_id, id, request)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Task"))
}

/// Soft-delete a task
async fn remove_task(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    if state.storage.remove_task(&user_id, id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::not_found("Task"))
    }
}
