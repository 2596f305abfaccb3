//! Blocking Schedule Model
//!
//! Weekly time windows during which the distraction blocker enforces one of
//! its lists. Days are 0-6 with Sunday first; times are wall-clock "HH:MM"
//! strings interpreted by the client.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which list a schedule enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BlockingMode {
    /// Only allow-listed sites pass
    Whitelist,
    /// Block-listed sites are denied
    Blacklist,
}

/// A recurring blocking window for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingSchedule {
    /// Record identifier
    pub id: u64,

    /// Display name, never blank
    pub name: String,

    /// Day of week, 0 = Sunday through 6 = Saturday
    pub day_of_week: u8,

    /// Window start, "HH:MM"
    pub start_time: String,

    /// Window end, "HH:MM"
    pub end_time: String,

    /// Enforcement mode
    #[serde(rename = "blockingType")]
    pub blocking_mode: BlockingMode,

    /// Whether the window is currently enforced
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

fn time_format() -> &'static Regex {
    static TIME_FORMAT: OnceLock<Regex> = OnceLock::new();
    TIME_FORMAT.get_or_init(|| {
        Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time pattern")
    })
}

fn check_time(value: &str) -> Result<(), ScheduleError> {
    if time_format().is_match(value) {
        Ok(())
    } else {
        Err(ScheduleError::InvalidTime(value.to_string()))
    }
}

fn check_day(day: u8) -> Result<(), ScheduleError> {
    if day > 6 {
        return Err(ScheduleError::InvalidDay(day));
    }
    Ok(())
}

/// DTO for creating a schedule
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    #[serde(default)]
    pub name: String,
    pub day_of_week: u8,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(rename = "blockingType", default)]
    pub blocking_mode: Option<BlockingMode>,
}

impl CreateScheduleRequest {
    /// Validate the window and build the stored record
    pub fn into_schedule(
        self,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<BlockingSchedule, ScheduleError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ScheduleError::NameRequired);
        }
        check_day(self.day_of_week)?;
        check_time(&self.start_time)?;
        check_time(&self.end_time)?;

        Ok(BlockingSchedule {
            id,
            name,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            blocking_mode: self.blocking_mode.unwrap_or(BlockingMode::Whitelist),
            is_active: true,
            created_at: now,
        })
    }
}

/// DTO for partially updating a schedule
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub name: Option<String>,
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "blockingType", default)]
    pub blocking_mode: Option<BlockingMode>,
    pub is_active: Option<bool>,
}

impl UpdateScheduleRequest {
    /// Apply the provided fields after validating them
    pub fn apply_to(&self, schedule: &mut BlockingSchedule) -> Result<(), ScheduleError> {
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ScheduleError::NameRequired);
            }
            schedule.name = name.to_string();
        }
        if let Some(day) = self.day_of_week {
            check_day(day)?;
            schedule.day_of_week = day;
        }
        if let Some(start) = &self.start_time {
            check_time(start)?;
            schedule.start_time = start.clone();
        }
        if let Some(end) = &self.end_time {
            check_time(end)?;
            schedule.end_time = end.clone();
        }
        if let Some(mode) = self.blocking_mode {
            schedule.blocking_mode = mode;
        }
        if let Some(active) = self.is_active {
            schedule.is_active = active;
        }
        Ok(())
    }
}

/// Schedule validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule name is required")]
    NameRequired,

    #[error("Day of week {0} is invalid (must be 0-6, Sunday first)")]
    InvalidDay(u8),

    #[error("Time {0:?} is invalid (expected HH:MM)")]
    InvalidTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 7, 9, 0, 0).single().unwrap()
    }

    fn request() -> CreateScheduleRequest {
        CreateScheduleRequest {
            name: "Deep Work Morning".to_string(),
            day_of_week: 1,
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
            blocking_mode: None,
        }
    }

    #[test]
    fn test_create_defaults_to_whitelist() {
        let schedule = request().into_schedule(1, now()).unwrap();
        assert_eq!(schedule.blocking_mode, BlockingMode::Whitelist);
        assert!(schedule.is_active);
    }

    #[test]
    fn test_rejects_bad_days_and_times() {
        let mut bad = request();
        bad.day_of_week = 7;
        assert_eq!(bad.into_schedule(1, now()), Err(ScheduleError::InvalidDay(7)));

        for time in ["24:00", "9:00", "12:60", "noon", ""] {
            let mut bad = request();
            bad.start_time = time.to_string();
            assert!(matches!(
                bad.into_schedule(1, now()),
                Err(ScheduleError::InvalidTime(_))
            ));
        }
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut bad = request();
        bad.name = "   ".to_string();
        assert_eq!(bad.into_schedule(1, now()), Err(ScheduleError::NameRequired));
    }

    #[test]
    fn test_partial_update_validates() {
        let mut schedule = request().into_schedule(1, now()).unwrap();

        UpdateScheduleRequest {
            is_active: Some(false),
            end_time: Some("13:30".to_string()),
            ..UpdateScheduleRequest::default()
        }
        .apply_to(&mut schedule)
        .unwrap();
        assert!(!schedule.is_active);
        assert_eq!(schedule.end_time, "13:30");

        let result = UpdateScheduleRequest {
            start_time: Some("25:00".to_string()),
            ..UpdateScheduleRequest::default()
        }
        .apply_to(&mut schedule);
        assert!(result.is_err());
        // Failed update left the schedule untouched
        assert_eq!(schedule.start_time, "09:00");
    }

    #[test]
    fn test_wire_names() {
        let schedule = CreateScheduleRequest {
            blocking_mode: Some(BlockingMode::Blacklist),
            ..request()
        }
        .into_schedule(2, now())
        .unwrap();

        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["dayOfWeek"], 1);
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["blockingType"], "blacklist");
        assert_eq!(value["isActive"], true);
    }
}
