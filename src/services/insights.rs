//! Insights Aggregation Service
//!
//! Owns the per-user daily statistics and derives the insights read model.
//! Counters roll over lazily: every access freshens the entry against
//! "today" in the configured timezone before reading or writing. There is
//! no scheduled job; a user who stays away simply finds zeroed counters on
//! their next request.

use chrono::NaiveDate;
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

use crate::models::daily_stats::{DailyStats, InsightsSnapshot};
use crate::models::session::Session;
use crate::services::time_provider::TimeProvider;

/// In-memory store of per-user daily counters
///
/// The outer lock only guards the map shape; each entry carries its own
/// mutex so users never contend with each other.
#[derive(Default)]
pub struct StatsStore {
    entries: RwLock<HashMap<String, Arc<Mutex<DailyStats>>>>,
}

impl StatsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or lazily create the entry for a user
    async fn entry(&self, user_id: &str, today: NaiveDate) -> Arc<Mutex<DailyStats>> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(user_id) {
                return entry.clone();
            }
        }

        let mut entries = self.entries.write().await;
        entries
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(DailyStats::new(today))))
            .clone()
    }

    /// Keys of every user seen so far
    async fn user_ids(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }
}

/// One row of the leaderboard source data
#[derive(Debug, Clone)]
pub struct UserScore {
    pub user_id: String,
    pub productive_minutes: f64,
    pub sessions_completed: u32,
}

/// Derives daily productivity insights from session lifecycle reports
pub struct InsightsAggregator {
    store: Arc<StatsStore>,
    time_provider: Arc<dyn TimeProvider>,
    timezone: Tz,
}

impl InsightsAggregator {
    /// Create a new aggregator over the given store
    pub fn new(store: Arc<StatsStore>, time_provider: Arc<dyn TimeProvider>, timezone: Tz) -> Self {
        Self {
            store,
            time_provider,
            timezone,
        }
    }

    fn today(&self) -> NaiveDate {
        self.time_provider.now_in_timezone(self.timezone).date_naive()
    }

    /// Lock a user's counters, rolling them over first when the day changed
    async fn fresh(&self, user_id: &str) -> OwnedMutexGuard<DailyStats> {
        let today = self.today();
        let entry = self.store.entry(user_id, today).await;
        let mut stats = entry.lock_owned().await;
        if stats.roll_over_if_stale(today) {
            info!(user_id = %user_id, date = %today, "daily counters rolled over");
        }
        stats
    }

    /// Accumulate pause minutes reported by a resume or stop
    pub async fn record_distracted_time(&self, user_id: &str, minutes: f64) {
        let mut stats = self.fresh(user_id).await;
        stats.add_distracted(minutes);
        debug!(user_id = %user_id, minutes, "recorded distracted time");
    }

    /// Credit a completed session
    pub async fn record_completion(&self, user_id: &str, actual_work_minutes: f64) {
        let mut stats = self.fresh(user_id).await;
        stats.add_completion(actual_work_minutes);
        debug!(
            user_id = %user_id,
            minutes = actual_work_minutes,
            sessions = stats.sessions_completed,
            "recorded completed session"
        );
    }

    /// Render the insights read model for one user
    ///
    /// The caller supplies its view of the active session; the aggregator
    /// itself never reaches into the session store.
    pub async fn snapshot(&self, user_id: &str, active: Option<&Session>) -> InsightsSnapshot {
        let stats = self.fresh(user_id).await;
        InsightsSnapshot::render(&stats, active)
    }

    /// Fresh per-user totals for leaderboard consumers
    pub async fn scores(&self) -> Vec<UserScore> {
        let mut scores = Vec::new();
        for user_id in self.store.user_ids().await {
            let stats = self.fresh(&user_id).await;
            scores.push(UserScore {
                productive_minutes: stats.total_productive_minutes,
                sessions_completed: stats.sessions_completed,
                user_id,
            });
        }
        scores
    }
}
