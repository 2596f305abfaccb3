//! Error handling for ProductivePro
//!
//! Centralized error types and handling for the application. Lifecycle
//! precondition failures map to 409 Conflict with a distinct per-kind code
//! so clients can surface a specific message for each.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::schedule::ScheduleError;
use crate::models::session::SessionError;
use crate::models::site::SiteError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Session(error) => match error {
                SessionError::InvalidDuration(_) => StatusCode::BAD_REQUEST,
                SessionError::SessionAlreadyActive
                | SessionError::NoActiveSession
                | SessionError::AlreadyPaused
                | SessionError::NoSessionToResume => StatusCode::CONFLICT,
            },
            AppError::Site(_) | AppError::Schedule(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Serialization(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Session(error) => error.error_code(),
            AppError::Site(_) => "SiteValidationError",
            AppError::Schedule(_) => "ScheduleValidationError",
            AppError::Validation(_) => "ValidationError",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "InternalError",
            AppError::Serialization(_) => "SerializationError",
            AppError::Io(_) => "IoError",
        }
    }

    /// Check if this error should be logged as an error vs debug
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::Internal(_) | AppError::Serialization(_) | AppError::Io(_)
        )
    }

    pub fn validation_error(message: &str) -> Self {
        AppError::Validation(message.to_string())
    }

    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(resource.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        if self.is_server_error() {
            tracing::error!(error = %self, code = error_code, "request failed");
        } else {
            tracing::debug!(error = %self, code = error_code, "request rejected");
        }

        let body = Json(json!({
            "error": error_code,
            "message": message,
            "timestamp": timestamp
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_conflicts_map_to_409() {
        for error in [
            SessionError::SessionAlreadyActive,
            SessionError::NoActiveSession,
            SessionError::AlreadyPaused,
            SessionError::NoSessionToResume,
        ] {
            assert_eq!(AppError::Session(error).status_code(), StatusCode::CONFLICT);
        }
        assert_eq!(
            AppError::Session(SessionError::InvalidDuration(0.0)).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_session_codes_pass_through() {
        assert_eq!(
            AppError::Session(SessionError::SessionAlreadyActive).error_code(),
            "InvalidState"
        );
        assert_eq!(
            AppError::Session(SessionError::NoSessionToResume).error_code(),
            "NoActiveSessionToResume"
        );
    }

    #[test]
    fn test_validation_and_not_found() {
        let error = AppError::validation_error("Title is required");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_code(), "ValidationError");

        let error = AppError::not_found("Task");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Task not found");
    }

    #[test]
    fn test_server_error_detection() {
        assert!(AppError::Internal("boom".to_string()).is_server_error());
        assert!(!AppError::validation_error("nope").is_server_error());
        assert!(!AppError::Session(SessionError::NoActiveSession).is_server_error());
    }

    #[test]
    fn test_error_response_format() {
        let response = AppError::Session(SessionError::SessionAlreadyActive).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
