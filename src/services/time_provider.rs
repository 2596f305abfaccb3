//! Time Provider Trait and Implementations
//!
//! Wall-clock abstraction for the session lifecycle and the daily rollover.
//! Production code uses the system clock; tests inject a controllable mock
//! instead of sleeping.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

/// Trait for providing time functionality
/// This enables dependency injection and testing with deterministic time
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now_utc(&self) -> DateTime<Utc>;

    /// Get current time in a specific timezone
    fn now_in_timezone(&self, timezone: Tz) -> DateTime<Tz> {
        self.now_utc().with_timezone(&timezone)
    }
}

/// System time provider for production use
#[derive(Debug, Clone)]
pub struct SystemTimeProvider;

impl SystemTimeProvider {
    /// Create a new system time provider
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock time provider for testing
///
/// Clones share the underlying instant, so a test can keep a handle for
/// advancing time while the services hold it as `Arc<dyn TimeProvider>`.
#[derive(Debug, Clone)]
pub struct MockTimeProvider {
    current_time: Arc<std::sync::Mutex<DateTime<Utc>>>,
}

impl MockTimeProvider {
    /// Create a new mock time provider starting from the given time
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(std::sync::Mutex::new(start_time)),
        }
    }

    /// Create a mock time provider starting from now
    pub fn new_from_now() -> Self {
        Self::new(Utc::now())
    }

    /// Set the current mock time
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        if let Ok(mut time) = self.current_time.lock() {
            *time = new_time;
        }
    }

    /// Advance the mock time by the specified duration
    pub fn advance(&self, duration: chrono::Duration) {
        if let Ok(mut time) = self.current_time.lock() {
            *time += duration;
        }
    }

    /// Advance the mock time by the specified number of seconds
    pub fn advance_seconds(&self, seconds: i64) {
        self.advance(chrono::Duration::seconds(seconds));
    }

    /// Advance the mock time by the specified number of minutes
    pub fn advance_minutes(&self, minutes: i64) {
        self.advance(chrono::Duration::minutes(minutes));
    }

    /// Advance the mock time by the specified number of hours
    pub fn advance_hours(&self, hours: i64) {
        self.advance(chrono::Duration::hours(hours));
    }

    /// Advance the mock time by the specified number of days
    pub fn advance_days(&self, days: i64) {
        self.advance(chrono::Duration::days(days));
    }

    /// Get the current mock time
    pub fn current_time(&self) -> DateTime<Utc> {
        if let Ok(time) = self.current_time.lock() {
            *time
        } else {
            Utc::now()
        }
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new_from_now()
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_utc(&self) -> DateTime<Utc> {
        self.current_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    #[test]
    fn test_system_time_provider() {
        let provider = SystemTimeProvider::new();
        let now = provider.now_utc();

        // System time should be reasonable (within last minute)
        let system_now = Utc::now();
        assert!((system_now - now).num_seconds().abs() < 60);
    }

    #[test]
    fn test_mock_time_provider() {
        let start_time = Utc.with_ymd_and_hms(2025, 1, 7, 10, 30, 0).single().unwrap();
        let provider = MockTimeProvider::new(start_time);

        assert_eq!(provider.now_utc(), start_time);
    }

    #[test]
    fn test_mock_time_advance() {
        let start_time = Utc.with_ymd_and_hms(2025, 1, 7, 10, 30, 0).single().unwrap();
        let provider = MockTimeProvider::new(start_time);

        provider.advance_hours(1);
        let expected = start_time + chrono::Duration::hours(1);
        assert_eq!(provider.now_utc(), expected);

        provider.advance_minutes(30);
        let expected = expected + chrono::Duration::minutes(30);
        assert_eq!(provider.now_utc(), expected);
    }

    #[test]
    fn test_clones_share_the_clock() {
        let start_time = Utc.with_ymd_and_hms(2025, 1, 7, 10, 30, 0).single().unwrap();
        let provider = MockTimeProvider::new(start_time);
        let handle = provider.clone();

        handle.advance_seconds(90);
        assert_eq!(provider.now_utc(), start_time + chrono::Duration::seconds(90));
    }

    #[test]
    fn test_now_in_timezone() {
        let start_time = Utc.with_ymd_and_hms(2025, 1, 7, 3, 0, 0).single().unwrap();
        let provider = MockTimeProvider::new(start_time);

        // 03:00 UTC on Jan 7 is still Jan 6 in New York
        let ny_now = provider.now_in_timezone(New_York);
        assert_eq!(ny_now.date_naive().to_string(), "2025-01-06");
        assert_eq!(ny_now.with_timezone(&Utc), start_time);
    }
}
