//! Pomodoro Session Model
//!
//! Represents a single focus session and its lifecycle. State-specific data
//! lives inside the phase variant, so a running session cannot carry a pause
//! timestamp and only finished sessions carry an end time. Transitions take
//! "now" as an argument; the caller owns the clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted session duration in minutes (24 hours)
pub const MAX_DURATION_MINUTES: f64 = 1440.0;

/// Elapsed minutes between two instants, from the millisecond difference
pub fn minutes_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 60_000.0
}

/// Session types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Get the default duration in minutes for this session kind
    pub fn default_minutes(&self) -> f64 {
        match self {
            SessionKind::Work => 25.0,
            SessionKind::ShortBreak => 5.0,
            SessionKind::LongBreak => 15.0,
        }
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionPhase {
    /// Counting down
    Running,
    /// Interrupted; the open pause interval started at `since`
    Paused { since: DateTime<Utc> },
    /// Finished with full credit
    Completed {
        ended_at: DateTime<Utc>,
        actual_work_minutes: f64,
    },
    /// Abandoned without credit
    Stopped { ended_at: DateTime<Utc> },
}

/// A single pomodoro session for one user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Unique identifier for the session
    pub id: String,

    /// Opaque owner key
    pub user_id: String,

    /// Planned length in minutes
    pub duration_minutes: f64,

    /// Kind of session
    pub kind: SessionKind,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// Accumulated pause time in minutes, unrounded
    pub total_pause_minutes: f64,

    /// Current lifecycle phase
    pub phase: SessionPhase,
}

impl Session {
    /// Create a new running session
    ///
    /// An omitted duration falls back to the kind's default. Durations must
    /// be positive and at most [`MAX_DURATION_MINUTES`].
    pub fn new(
        user_id: &str,
        kind: SessionKind,
        duration_minutes: Option<f64>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let duration = duration_minutes.unwrap_or_else(|| kind.default_minutes());
        if !duration.is_finite() || duration <= 0.0 || duration > MAX_DURATION_MINUTES {
            return Err(SessionError::InvalidDuration(duration));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            duration_minutes: duration,
            kind,
            started_at,
            total_pause_minutes: 0.0,
            phase: SessionPhase::Running,
        })
    }

    /// Check whether the session is currently paused
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, SessionPhase::Paused { .. })
    }

    /// Check whether the session has reached a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Completed { .. } | SessionPhase::Stopped { .. }
        )
    }

    /// When the open pause started, if paused
    pub fn paused_since(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            SessionPhase::Paused { since } => Some(since),
            _ => None,
        }
    }

    /// When the session ended, if terminal
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            SessionPhase::Completed { ended_at, .. } | SessionPhase::Stopped { ended_at } => {
                Some(ended_at)
            }
            _ => None,
        }
    }

    /// Whether the session finished with full credit
    pub fn completed(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed { .. })
    }

    /// Credited focus minutes, known once completed
    pub fn actual_work_minutes(&self) -> Option<f64> {
        match self.phase {
            SessionPhase::Completed {
                actual_work_minutes, ..
            } => Some(actual_work_minutes),
            _ => None,
        }
    }

    /// Short lowercase name of the current phase
    pub fn phase_label(&self) -> &'static str {
        match self.phase {
            SessionPhase::Running => "running",
            SessionPhase::Paused { .. } => "paused",
            SessionPhase::Completed { .. } => "completed",
            SessionPhase::Stopped { .. } => "stopped",
        }
    }

    /// Pause a running session, recording when the interruption began
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<DateTime<Utc>, SessionError> {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused { since: now };
                Ok(now)
            }
            SessionPhase::Paused { .. } => Err(SessionError::AlreadyPaused),
            _ => Err(SessionError::NoActiveSession),
        }
    }

    /// Resume a paused session, folding the closed pause interval into the
    /// accumulated total. Returns the folded minutes.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<f64, SessionError> {
        match self.phase {
            SessionPhase::Paused { since } => {
                let elapsed = minutes_between(since, now).max(0.0);
                self.total_pause_minutes += elapsed;
                self.phase = SessionPhase::Running;
                Ok(elapsed)
            }
            _ => Err(SessionError::NoSessionToResume),
        }
    }

    /// Finish with full credit
    ///
    /// Legal from both running and paused; an open pause interval is
    /// discarded rather than folded. Returns the credited work minutes,
    /// `max(0, duration - total pause)`.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<f64, SessionError> {
        match self.phase {
            SessionPhase::Running | SessionPhase::Paused { .. } => {
                let actual = (self.duration_minutes - self.total_pause_minutes).max(0.0);
                self.phase = SessionPhase::Completed {
                    ended_at: now,
                    actual_work_minutes: actual,
                };
                Ok(actual)
            }
            _ => Err(SessionError::NoActiveSession),
        }
    }

    /// Abandon without credit
    ///
    /// If paused, the open interval is folded into the accumulated total
    /// first, exactly as a resume would have done; the folded minutes are
    /// returned so the caller can report them.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<Option<f64>, SessionError> {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Stopped { ended_at: now };
                Ok(None)
            }
            SessionPhase::Paused { since } => {
                let folded = minutes_between(since, now).max(0.0);
                self.total_pause_minutes += folded;
                self.phase = SessionPhase::Stopped { ended_at: now };
                Ok(Some(folded))
            }
            _ => Err(SessionError::NoActiveSession),
        }
    }
}

/// Session lifecycle errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Session duration {0} is invalid (must be between 0 and 1440 minutes)")]
    InvalidDuration(f64),

    #[error("A session is already active; complete or stop it first")]
    SessionAlreadyActive,

    #[error("No active session")]
    NoActiveSession,

    #[error("Session is already paused")]
    AlreadyPaused,

    #[error("No active session to resume")]
    NoSessionToResume,
}

impl SessionError {
    /// Stable machine-readable code, one per failure kind
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::InvalidDuration(_) => "InvalidDuration",
            SessionError::SessionAlreadyActive => "InvalidState",
            SessionError::NoActiveSession => "NoActiveSession",
            SessionError::AlreadyPaused => "AlreadyPaused",
            SessionError::NoSessionToResume => "NoActiveSessionToResume",
        }
    }
}

/// Wire representation of a session, flattened the way the clients expect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub user_id: String,
    pub kind: SessionKind,
    pub phase: &'static str,
    pub duration_minutes: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub total_pause_minutes: f64,
    pub actual_work_minutes: Option<f64>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            user_id: session.user_id.clone(),
            kind: session.kind,
            phase: session.phase_label(),
            duration_minutes: session.duration_minutes,
            started_at: session.started_at,
            ended_at: session.ended_at(),
            paused_at: session.paused_since(),
            completed: session.completed(),
            total_pause_minutes: session.total_pause_minutes,
            actual_work_minutes: session.actual_work_minutes(),
        }
    }
}
