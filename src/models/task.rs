//! Task Planner Model
//!
//! Daily planner entries shown next to the timer. Deleting a task only
//! deactivates it; listings filter on the active flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A planner entry for one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Record identifier
    pub id: u64,

    /// Short label, never blank
    pub title: String,

    /// Optional free-form details
    pub description: Option<String>,

    /// Optional display slot, e.g. "09:00 - 10:00"
    pub time_slot: Option<String>,

    /// Scheduling priority
    pub priority: Priority,

    /// Whether the task has been checked off
    pub completed: bool,

    /// Soft-delete flag
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a task
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl CreateTaskRequest {
    /// Build the stored record; the caller supplies identity and time
    pub fn into_task(self, id: u64, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            time_slot: self.time_slot,
            priority: self.priority.unwrap_or(Priority::Medium),
            completed: false,
            is_active: true,
            created_at: now,
        }
    }
}

/// DTO for partially updating a task
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_slot: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Apply the provided fields, leaving the rest untouched
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(time_slot) = &self.time_slot {
            task.time_slot = Some(time_slot.clone());
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
