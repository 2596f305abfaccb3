//! Motivational Nudge Model
//!
//! Server-stored reminders the clients poll for. How a nudge is surfaced is
//! entirely the client's business; the backend only stores, lists, and marks
//! them read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nudge categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NudgeKind {
    FocusReminder,
    BreakReminder,
    GoalReminder,
}

/// A stored reminder for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    /// Record identifier
    pub id: u64,

    /// Category, wire name "type"
    #[serde(rename = "type")]
    pub kind: NudgeKind,

    /// Message text, never blank
    pub message: String,

    /// Whether the user has seen it
    pub is_read: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a nudge
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNudgeRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<NudgeKind>,
    #[serde(default)]
    pub message: String,
}

impl CreateNudgeRequest {
    /// Build the stored record; blank messages are rejected by the API layer
    pub fn into_nudge(self, id: u64, now: DateTime<Utc>) -> Nudge {
        Nudge {
            id,
            kind: self.kind.unwrap_or(NudgeKind::FocusReminder),
            message: self.message.trim().to_string(),
            is_read: false,
            created_at: now,
        }
    }
}
