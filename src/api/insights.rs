//! Insights API Endpoints
//!
//! Read-only reporting: the daily usage snapshot and the cross-user
//! leaderboard. Day rollover happens lazily inside the aggregator on every
//! read, so neither endpoint ever returns yesterday's numbers.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::models::daily_stats::round_minutes;
use crate::models::InsightsSnapshot;

use super::{AppState, UserIdentity};

/// Create insights API routes
pub fn create_insights_routes() -> Router<AppState> {
    Router::new()
        .route("/insights", get(usage_insights))
        .route("/leaderboard", get(leaderboard))
}

/// Query parameters for the leaderboard
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One leaderboard row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub productive_minutes: u64,
    pub sessions_completed: u32,
}

/// Get today's usage snapshot for the requesting user
async fn usage_insights(
    State(state): State<AppState>,
    UserIdentity(user_id): UserIdentity,
) -> Json<InsightsSnapshot> {
    let current = state.sessions.current(&user_id).await;
    let snapshot = state.insights.snapshot(&user_id, current.as_ref()).await;
    Json(snapshot)
}

/// Get today's top users by productive minutes
async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    let mut scores = state.insights.scores().await;
    scores.sort_by(|a, b| {
        b.productive_minutes
            .total_cmp(&a.productive_minutes)
            .then(b.sessions_completed.cmp(&a.sessions_completed))
    });

    let limit = query.limit.unwrap_or(10);
    let entries = scores
        .into_iter()
        .take(limit)
        .map(|score| LeaderboardEntry {
            user_id: score.user_id,
            productive_minutes: round_minutes(score.productive_minutes),
            sessions_completed: score.sessions_completed,
        })
        .collect();
    Json(entries)
}
