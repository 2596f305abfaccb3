//! ProductivePro backend
//!
//! Pomodoro session tracking, daily productivity insights and focus
//! tooling (tasks, site lists, blocking schedules, nudges) behind a
//! JSON API.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

// Re-exports for convenient access
pub use config::Config;
pub use error::{AppError, AppResult};
