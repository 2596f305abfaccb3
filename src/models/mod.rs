//! Models module for ProductivePro
//!
//! Contains all data models and their validation logic.

pub mod daily_stats;
pub mod nudge;
pub mod schedule;
pub mod session;
pub mod site;
pub mod task;

// Re-export commonly used types
pub use daily_stats::{DailyStats, InsightsSnapshot};
pub use session::{Session, SessionError, SessionKind, SessionPhase, SessionView};
