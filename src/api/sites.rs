//! Site List API Endpoints
//!
//! The distraction blocker's two per-user lists. The server only stores
//! them; enforcement happens in the browser extension, which polls these
//! routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::site::{CreateSiteRequest, SiteEntry};

use super::{AppState, UserIdentity};

/// Create site list API routes
pub fn create_site_routes() -> Router<AppState> {
    Router::new()
        .route("/blocked", get(list_blocked).post(add_blocked))
        .route("/blocked/:id", delete(remove_blocked))
        .route("/whitelist", get(list_whitelist).post(add_whitelist))
        .route("/whitelist/:id", delete(remove_whitelist))
}

/// List blocked sites
async fn list_blocked(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Vec<SiteEntry>> {
    Json(state.storage.blocked_sites(&user_id).await)
}

/// Add a blocked site
async fn add_blocked(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Json(request): Json<CreateSiteRequest>,
) -> AppResult<Json<SiteEntry>> {
    let entry = state.storage.add_blocked_site(&user_id, request).await?;
    Ok(Json(entry))
}

/// Remove a blocked site
async fn remove_blocked(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    if state.storage.remove_blocked_site(&user_id, id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::not_found("Blocked site"))
    }
}

/// List whitelisted sites
async fn list_whitelist(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<Vec<SiteEntry>> {
    Json(state.storage.whitelist_sites(&user_id).await)
}

/// Add a whitelisted site
async fn add_whitelist(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Json(request): Json<CreateSiteRequest>,
) -> AppResult<Json<SiteEntry>> {
    let entry = state.storage.add_whitelist_site(&user_id, request).await?;
    Ok(Json(entry))
}

/// Remove a whitelisted site
async fn remove_whitelist(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    if state.storage.remove_whitelist_site(&user_id, id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::not_found("Whitelist site"))
    }
}
