//! API module for ProductivePro
//!
//! Contains all REST API endpoints and routing. Every route lives under
//! `/api`; the nesting happens in `main`.

pub mod identity;
pub mod insights;
pub mod nudges;
pub mod pomodoro;
pub mod quotes;
pub mod schedules;
pub mod sites;
pub mod tasks;

pub use identity::{UserIdentity, DEMO_USER_ID};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::services::{InsightsAggregator, SessionClock};
use crate::storage::MemoryStorage;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionClock>,
    pub insights: Arc<InsightsAggregator>,
    pub storage: Arc<MemoryStorage>,
}

/// Assemble the API router
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .nest("/pomodoro", pomodoro::create_pomodoro_routes())
        .nest("/tasks", tasks::create_task_routes())
        .nest("/sites", sites::create_site_routes())
        .nest("/schedules", schedules::create_schedule_routes())
        .nest("/nudges", nudges::create_nudge_routes())
        .merge(insights::create_insights_routes())
        .merge(quotes::create_quote_routes())
        .route("/health", get(health_check))
        .with_state(state)
}

/// Liveness probe
async fn health_check() -> &'static str {
    "OK"
}
