//! Daily Productivity Statistics Model
//!
//! Per-user counters for a single day in the configured rollover timezone.
//! Counters accumulate unrounded f64 minutes; integer rounding happens only
//! when a snapshot is rendered.

use chrono::NaiveDate;
use serde::Serialize;

use super::session::Session;

/// Round accumulated minutes for a read-out
pub fn round_minutes(minutes: f64) -> u64 {
    minutes.round() as u64
}

/// One user's productivity counters for the current day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    /// Minutes of credited focus work
    pub total_productive_minutes: f64,

    /// Minutes spent paused during sessions
    pub total_distracted_minutes: f64,

    /// Sessions finished with full credit
    pub sessions_completed: u32,

    /// Day the counters belong to, in the rollover timezone
    pub last_reset: NaiveDate,
}

impl DailyStats {
    /// Create zeroed counters stamped with today's date
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total_productive_minutes: 0.0,
            total_distracted_minutes: 0.0,
            sessions_completed: 0,
            last_reset: today,
        }
    }

    /// Zero the counters when `today` differs from the recorded day
    ///
    /// Returns whether a rollover happened. Must run before any read or
    /// write of the counters; yesterday's numbers are discarded, not
    /// archived.
    pub fn roll_over_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.last_reset == today {
            return false;
        }
        *self = Self::new(today);
        true
    }

    /// Accumulate pause minutes reported by a resume or stop
    pub fn add_distracted(&mut self, minutes: f64) {
        self.total_distracted_minutes += minutes.max(0.0);
    }

    /// Credit a completed session's work minutes
    pub fn add_completion(&mut self, actual_work_minutes: f64) {
        self.total_productive_minutes += actual_work_minutes.max(0.0);
        self.sessions_completed += 1;
    }

    /// Share of logged time that was productive, as a whole percentage
    ///
    /// 0 when nothing has been logged yet.
    pub fn focus_score(&self) -> u32 {
        let total = self.total_productive_minutes + self.total_distracted_minutes;
        if total > 0.0 {
            ((self.total_productive_minutes / total) * 100.0).round() as u32
        } else {
            0
        }
    }
}

/// Wire snapshot of a user's day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSnapshot {
    pub total_productive_time: u64,
    pub total_distracted_time: u64,
    pub pomodoro_count: u32,
    pub focus_score: u32,
    pub time_away: u64,
    pub current_session: Option<ActiveSessionInsights>,
}

/// Pause details of the in-flight session, when one exists
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessionInsights {
    pub total_pause_time: u64,
    pub is_paused: bool,
}

impl InsightsSnapshot {
    /// Render fresh counters plus the caller's view of the active session
    pub fn render(stats: &DailyStats, active: Option<&Session>) -> Self {
        let distracted = round_minutes(stats.total_distracted_minutes);
        Self {
            total_productive_time: round_minutes(stats.total_productive_minutes),
            total_distracted_time: distracted,
            pomodoro_count: stats.sessions_completed,
            focus_score: stats.focus_score(),
            time_away: distracted,
            current_session: active.map(|session| ActiveSessionInsights {
                total_pause_time: round_minutes(session.total_pause_minutes),
                is_paused: session.is_paused(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionKind;
    use chrono::{TimeZone, Utc};

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_new_stats_are_zeroed() {
        let stats = DailyStats::new(day(7));
        assert_eq!(stats.total_productive_minutes, 0.0);
        assert_eq!(stats.total_distracted_minutes, 0.0);
        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.last_reset, day(7));
        assert_eq!(stats.focus_score(), 0);
    }

    #[test]
    fn test_rollover_only_on_a_new_day() {
        let mut stats = DailyStats::new(day(7));
        stats.add_completion(25.0);
        stats.add_distracted(5.0);

        assert!(!stats.roll_over_if_stale(day(7)));
        assert_eq!(stats.sessions_completed, 1);

        assert!(stats.roll_over_if_stale(day(8)));
        assert_eq!(stats.total_productive_minutes, 0.0);
        assert_eq!(stats.total_distracted_minutes, 0.0);
        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.last_reset, day(8));
    }

    #[test]
    fn test_accumulation() {
        let mut stats = DailyStats::new(day(7));
        stats.add_completion(22.5);
        stats.add_completion(25.0);
        stats.add_distracted(3.25);
        stats.add_distracted(-1.0); // clock skew guard

        assert!((stats.total_productive_minutes - 47.5).abs() < 1e-9);
        assert!((stats.total_distracted_minutes - 3.25).abs() < 1e-9);
        assert_eq!(stats.sessions_completed, 2);
    }

    #[test]
    fn test_focus_score_rounding() {
        let mut stats = DailyStats::new(day(7));
        stats.add_completion(20.0);
        stats.add_distracted(5.0);
        assert_eq!(stats.focus_score(), 80);

        let mut stats = DailyStats::new(day(7));
        stats.add_completion(1.0);
        stats.add_distracted(2.0);
        assert_eq!(stats.focus_score(), 33);

        let mut stats = DailyStats::new(day(7));
        stats.add_completion(2.0);
        stats.add_distracted(1.0);
        assert_eq!(stats.focus_score(), 67);
    }

    #[test]
    fn test_round_minutes() {
        assert_eq!(round_minutes(0.0), 0);
        assert_eq!(round_minutes(4.4), 4);
        assert_eq!(round_minutes(4.5), 5);
        assert_eq!(round_minutes(24.999), 25);
    }

    #[test]
    fn test_snapshot_render() {
        let start = Utc.with_ymd_and_hms(2025, 1, 7, 9, 0, 0).single().unwrap();
        let mut stats = DailyStats::new(day(7));
        stats.add_completion(21.4);
        stats.add_distracted(3.6);

        let snapshot = InsightsSnapshot::render(&stats, None);
        assert_eq!(snapshot.total_productive_time, 21);
        assert_eq!(snapshot.total_distracted_time, 4);
        assert_eq!(snapshot.time_away, 4);
        assert_eq!(snapshot.pomodoro_count, 1);
        assert_eq!(snapshot.focus_score, 86);
        assert!(snapshot.current_session.is_none());

        let mut session =
            crate::models::session::Session::new("demo-user", SessionKind::Work, None, start)
                .unwrap();
        session.total_pause_minutes = 3.6;
        session.pause(start).unwrap();

        let snapshot = InsightsSnapshot::render(&stats, Some(&session));
        let current = snapshot.current_session.unwrap();
        assert_eq!(current.total_pause_time, 4);
        assert!(current.is_paused);
    }

    #[test]
    fn test_snapshot_wire_names() {
        let stats = DailyStats::new(day(7));
        let value = serde_json::to_value(InsightsSnapshot::render(&stats, None)).unwrap();
        assert_eq!(value["totalProductiveTime"], 0);
        assert_eq!(value["totalDistractedTime"], 0);
        assert_eq!(value["pomodoroCount"], 0);
        assert_eq!(value["focusScore"], 0);
        assert_eq!(value["timeAway"], 0);
        assert!(value["currentSession"].is_null());
    }
}
