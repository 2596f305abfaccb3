//! Services module for ProductivePro
//!
//! Contains all business logic and service implementations.

pub mod insights;
pub mod session_clock;
pub mod time_provider;

// Re-export commonly used services
pub use insights::{InsightsAggregator, StatsStore, UserScore};
pub use session_clock::{SessionClock, SessionStore};
pub use time_provider::{MockTimeProvider, SystemTimeProvider, TimeProvider};
