//! Session Clock Service
//!
//! The per-user pomodoro lifecycle: start, pause, resume, complete and stop,
//! plus the current-session read and the bounded archive. Pause and
//! completion figures are forwarded to the insights aggregator at the moment
//! they become final, while the user's slot is still held, so a crashed
//! request can never half-report.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::models::session::{Session, SessionError, SessionKind};
use crate::services::insights::InsightsAggregator;
use crate::services::time_provider::TimeProvider;

/// Active session plus archive for one user
///
/// The active slot never holds a terminal session; terminal transitions move
/// the finalized copy into the archive and empty the slot.
#[derive(Debug, Default)]
struct UserSlot {
    active: Option<Session>,
    history: VecDeque<Session>,
}

impl UserSlot {
    fn active_mut(&mut self) -> Result<&mut Session, SessionError> {
        self.active.as_mut().ok_or(SessionError::NoActiveSession)
    }

    /// Append to the archive, evicting the oldest entries past the cap
    fn archive(&mut self, session: Session, limit: usize) {
        self.history.push_back(session);
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }

    /// Replace the archived copy matching `session` by id
    fn upsert_archived(&mut self, session: &Session) {
        if let Some(existing) = self.history.iter_mut().rev().find(|s| s.id == session.id) {
            *existing = session.clone();
        }
    }

    /// Bring the active session's archived copy up to date
    fn sync_archive(&mut self) {
        if let Some(active) = self.active.clone() {
            self.upsert_archived(&active);
        }
    }
}

/// In-memory store of per-user session slots
///
/// Same locking shape as the stats store: the outer map lock is held only to
/// locate a slot, every mutation runs under that user's own mutex.
pub struct SessionStore {
    slots: RwLock<HashMap<String, Arc<Mutex<UserSlot>>>>,
    history_limit: usize,
}

impl SessionStore {
    /// Create an empty store keeping at most `history_limit` archived
    /// sessions per user
    pub fn new(history_limit: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            history_limit,
        }
    }

    fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Fetch or lazily create the slot for a user
    async fn slot(&self, user_id: &str) -> Arc<Mutex<UserSlot>> {
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(user_id) {
                return slot.clone();
            }
        }

        let mut slots = self.slots.write().await;
        slots
            .entry(user_id.to_string())
            .or_insert_with(Arc::default)
            .clone()
    }

    /// Fetch the slot for a user without creating one
    async fn get(&self, user_id: &str) -> Option<Arc<Mutex<UserSlot>>> {
        self.slots.read().await.get(user_id).cloned()
    }
}

/// Drives the pomodoro session state machine for every user
pub struct SessionClock {
    store: Arc<SessionStore>,
    insights: Arc<InsightsAggregator>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SessionClock {
    /// Create a new session clock over the given store
    pub fn new(
        store: Arc<SessionStore>,
        insights: Arc<InsightsAggregator>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            store,
            insights,
            time_provider,
        }
    }

    /// Start a new session
    ///
    /// Fails with [`SessionError::SessionAlreadyActive`] when one is already
    /// running or paused; the caller must complete or stop it first.
    pub async fn start(
        &self,
        user_id: &str,
        kind: Option<SessionKind>,
        duration_minutes: Option<f64>,
    ) -> Result<Session, SessionError> {
        let slot = self.store.slot(user_id).await;
        let mut slot = slot.lock().await;

        if slot.active.is_some() {
            return Err(SessionError::SessionAlreadyActive);
        }

        let now = self.time_provider.now_utc();
        let session = Session::new(user_id, kind.unwrap_or(SessionKind::Work), duration_minutes, now)?;
        slot.active = Some(session.clone());
        slot.archive(session.clone(), self.store.history_limit());

        info!(
            user_id = %user_id,
            session_id = %session.id,
            kind = %session.kind,
            duration_minutes = session.duration_minutes,
            "session started"
        );
        Ok(session)
    }

    /// Pause the active session, returning when the pause began
    pub async fn pause(&self, user_id: &str) -> Result<DateTime<Utc>, SessionError> {
        let slot = self.store.slot(user_id).await;
        let mut slot = slot.lock().await;

        let now = self.time_provider.now_utc();
        let paused_at = slot.active_mut()?.pause(now)?;
        slot.sync_archive();

        debug!(user_id = %user_id, "session paused");
        Ok(paused_at)
    }

    /// Resume the paused session, returning the cumulative pause minutes
    ///
    /// The freshly folded interval is reported to the insights aggregator as
    /// distracted time.
    pub async fn resume(&self, user_id: &str) -> Result<f64, SessionError> {
        let slot = self.store.slot(user_id).await;
        let mut slot = slot.lock().await;

        let now = self.time_provider.now_utc();
        let session = match slot.active.as_mut() {
            Some(session) => session,
            None => return Err(SessionError::NoSessionToResume),
        };
        let folded = session.resume(now)?;
        let total_pause_minutes = session.total_pause_minutes;
        slot.sync_archive();

        self.insights.record_distracted_time(user_id, folded).await;

        debug!(
            user_id = %user_id,
            folded_minutes = folded,
            total_pause_minutes,
            "session resumed"
        );
        Ok(total_pause_minutes)
    }

    /// Finish the active session with full credit
    pub async fn complete(&self, user_id: &str) -> Result<Session, SessionError> {
        let slot = self.store.slot(user_id).await;
        let mut slot = slot.lock().await;

        let now = self.time_provider.now_utc();
        let mut session = slot.active.take().ok_or(SessionError::NoActiveSession)?;
        let actual = session.complete(now)?;
        slot.upsert_archived(&session);

        self.insights.record_completion(user_id, actual).await;

        info!(
            user_id = %user_id,
            session_id = %session.id,
            actual_work_minutes = actual,
            "session completed"
        );
        Ok(session)
    }

    /// Abandon the active session without credit
    ///
    /// An open pause is folded and reported exactly as a resume would have
    /// done; the session itself counts for nothing.
    pub async fn stop(&self, user_id: &str) -> Result<Session, SessionError> {
        let slot = self.store.slot(user_id).await;
        let mut slot = slot.lock().await;

        let now = self.time_provider.now_utc();
        let mut session = slot.active.take().ok_or(SessionError::NoActiveSession)?;
        let folded = session.stop(now)?;
        slot.upsert_archived(&session);

        if let Some(minutes) = folded {
            self.insights.record_distracted_time(user_id, minutes).await;
        }

        info!(
            user_id = %user_id,
            session_id = %session.id,
            total_pause_minutes = session.total_pause_minutes,
            "session stopped"
        );
        Ok(session)
    }

    /// The active session, if any. Side-effect free.
    pub async fn current(&self, user_id: &str) -> Option<Session> {
        match self.store.get(user_id).await {
            Some(slot) => slot.lock().await.active.clone(),
            None => None,
        }
    }

    /// Archived sessions, oldest first, capped at the store's limit
    pub async fn history(&self, user_id: &str) -> Vec<Session> {
        match self.store.get(user_id).await {
            Some(slot) => slot.lock().await.history.iter().cloned().collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::insights::StatsStore;
    use crate::services::time_provider::MockTimeProvider;
    use chrono::TimeZone;

    fn start_of_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 7, 9, 0, 0).single().unwrap()
    }

    fn clock_at(start: DateTime<Utc>) -> (SessionClock, Arc<InsightsAggregator>, MockTimeProvider) {
        let mock = MockTimeProvider::new(start);
        let time_provider: Arc<dyn TimeProvider> = Arc::new(mock.clone());
        let insights = Arc::new(InsightsAggregator::new(
            Arc::new(StatsStore::new()),
            time_provider.clone(),
            chrono_tz::UTC,
        ));
        let clock = SessionClock::new(
            Arc::new(SessionStore::new(10)),
            insights.clone(),
            time_provider,
        );
        (clock, insights, mock)
    }

    #[tokio::test]
    async fn test_start_rejects_a_second_session() {
        let (clock, _insights, _mock) = clock_at(start_of_day());

        let first = clock.start("demo-user", None, None).await.unwrap();
        let error = clock.start("demo-user", None, Some(10.0)).await.unwrap_err();
        assert_eq!(error, SessionError::SessionAlreadyActive);

        // The running session is untouched
        let current = clock.current("demo-user").await.unwrap();
        assert_eq!(current.id, first.id);
        assert_eq!(current.duration_minutes, 25.0);
    }

    #[tokio::test]
    async fn test_full_lifecycle_updates_insights() {
        let (clock, insights, mock) = clock_at(start_of_day());

        clock.start("demo-user", None, None).await.unwrap();
        clock.pause("demo-user").await.unwrap();
        mock.advance_minutes(5);
        let total_pause = clock.resume("demo-user").await.unwrap();
        assert!((total_pause - 5.0).abs() < 1e-9);

        mock.advance_minutes(20);
        let session = clock.complete("demo-user").await.unwrap();
        assert!(session.completed());
        assert_eq!(session.actual_work_minutes(), Some(20.0));

        let snapshot = insights.snapshot("demo-user", None).await;
        assert_eq!(snapshot.total_productive_time, 20);
        assert_eq!(snapshot.time_away, 5);
        assert_eq!(snapshot.pomodoro_count, 1);
        assert_eq!(snapshot.focus_score, 80);

        assert!(clock.current("demo-user").await.is_none());
    }

    #[tokio::test]
    async fn test_pause_preconditions() {
        let (clock, _insights, _mock) = clock_at(start_of_day());

        let error = clock.pause("demo-user").await.unwrap_err();
        assert_eq!(error, SessionError::NoActiveSession);

        clock.start("demo-user", None, None).await.unwrap();
        clock.pause("demo-user").await.unwrap();
        let error = clock.pause("demo-user").await.unwrap_err();
        assert_eq!(error, SessionError::AlreadyPaused);
    }

    #[tokio::test]
    async fn test_resume_preconditions() {
        let (clock, _insights, _mock) = clock_at(start_of_day());

        let error = clock.resume("demo-user").await.unwrap_err();
        assert_eq!(error, SessionError::NoSessionToResume);

        clock.start("demo-user", None, None).await.unwrap();
        let error = clock.resume("demo-user").await.unwrap_err();
        assert_eq!(error, SessionError::NoSessionToResume);
    }

    #[tokio::test]
    async fn test_resume_returns_the_cumulative_total() {
        let (clock, _insights, mock) = clock_at(start_of_day());

        clock.start("demo-user", None, None).await.unwrap();
        clock.pause("demo-user").await.unwrap();
        mock.advance_minutes(3);
        let total = clock.resume("demo-user").await.unwrap();
        assert!((total - 3.0).abs() < 1e-9);

        mock.advance_minutes(1);
        clock.pause("demo-user").await.unwrap();
        mock.advance_minutes(4);
        let total = clock.resume("demo-user").await.unwrap();
        assert!((total - 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_stop_folds_the_open_pause_once() {
        let (clock, insights, mock) = clock_at(start_of_day());

        clock.start("demo-user", None, None).await.unwrap();
        clock.pause("demo-user").await.unwrap();
        mock.advance_minutes(3);

        let session = clock.stop("demo-user").await.unwrap();
        assert!(!session.completed());
        assert!((session.total_pause_minutes - 3.0).abs() < 1e-9);

        // No completion credit, but the pause counts as time away
        let snapshot = insights.snapshot("demo-user", None).await;
        assert_eq!(snapshot.total_productive_time, 0);
        assert_eq!(snapshot.time_away, 3);
        assert_eq!(snapshot.pomodoro_count, 0);

        // The slot is empty now
        let error = clock.stop("demo-user").await.unwrap_err();
        assert_eq!(error, SessionError::NoActiveSession);
    }

    #[tokio::test]
    async fn test_complete_requires_an_active_session() {
        let (clock, _insights, _mock) = clock_at(start_of_day());
        let error = clock.complete("demo-user").await.unwrap_err();
        assert_eq!(error, SessionError::NoActiveSession);
    }

    #[tokio::test]
    async fn test_start_uses_kind_defaults() {
        let (clock, _insights, _mock) = clock_at(start_of_day());
        let session = clock
            .start("demo-user", Some(SessionKind::ShortBreak), None)
            .await
            .unwrap();
        assert_eq!(session.duration_minutes, 5.0);
    }

    #[tokio::test]
    async fn test_invalid_duration_is_rejected() {
        let (clock, _insights, _mock) = clock_at(start_of_day());
        let error = clock.start("demo-user", None, Some(-1.0)).await.unwrap_err();
        assert!(matches!(error, SessionError::InvalidDuration(_)));
        assert!(clock.current("demo-user").await.is_none());
    }

    #[tokio::test]
    async fn test_archive_tracks_transitions() {
        let (clock, _insights, mock) = clock_at(start_of_day());

        let session = clock.start("demo-user", None, None).await.unwrap();
        clock.pause("demo-user").await.unwrap();

        let history = clock.history("demo-user").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, session.id);
        assert!(history[0].is_paused());

        mock.advance_minutes(2);
        clock.resume("demo-user").await.unwrap();
        clock.complete("demo-user").await.unwrap();

        let history = clock.history("demo-user").await;
        assert_eq!(history.len(), 1);
        assert!(history[0].completed());
        assert_eq!(history[0].ended_at(), Some(mock.now_utc()));
    }

    #[tokio::test]
    async fn test_history_keeps_only_the_newest_ten() {
        let (clock, _insights, mock) = clock_at(start_of_day());

        let mut ids = Vec::new();
        for _ in 0..11 {
            let session = clock.start("demo-user", None, None).await.unwrap();
            ids.push(session.id.clone());
            mock.advance_minutes(1);
            clock.stop("demo-user").await.unwrap();
        }

        let history = clock.history("demo-user").await;
        assert_eq!(history.len(), 10);
        // Oldest first, and the very first session fell off the front
        let archived: Vec<_> = history.iter().map(|s| s.id.clone()).collect();
        assert_eq!(archived, ids[1..].to_vec());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let (clock, _insights, _mock) = clock_at(start_of_day());

        clock.start("alice", None, None).await.unwrap();
        clock.start("bob", None, Some(50.0)).await.unwrap();
        clock.stop("bob").await.unwrap();

        let alice = clock.current("alice").await.unwrap();
        assert!(!alice.is_terminal());
        assert!(clock.current("bob").await.is_none());
    }

    #[tokio::test]
    async fn test_reads_do_not_create_slots() {
        let (clock, _insights, _mock) = clock_at(start_of_day());
        assert!(clock.current("nobody").await.is_none());
        assert!(clock.history("nobody").await.is_empty());
    }
}
