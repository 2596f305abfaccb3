//! Site List Model
//!
//! Entries for the distraction blocker's block and allow lists. Stored
//! values are bare hosts ("example.com"); anything with a scheme or path is
//! rejected at the door.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Host;

/// Entry in a block or allow list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    /// Record identifier
    pub id: u64,

    /// Normalized host name
    pub url: String,

    /// Optional grouping label, e.g. "social_media"
    pub category: Option<String>,

    /// Whether the blocker should consider this entry
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for adding a site to either list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl CreateSiteRequest {
    /// Validate the host and build the stored record
    pub fn into_entry(self, id: u64, now: DateTime<Utc>) -> Result<SiteEntry, SiteError> {
        let trimmed = self.url.trim();
        if trimmed.is_empty() {
            return Err(SiteError::EmptyHost);
        }
        let host =
            Host::parse(trimmed).map_err(|_| SiteError::InvalidHost(trimmed.to_string()))?;

        Ok(SiteEntry {
            id,
            url: host.to_string(),
            category: self.category,
            is_active: true,
            created_at: now,
        })
    }
}

/// Site entry validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    #[error("Site host is required")]
    EmptyHost,

    #[error("Site host {0:?} is invalid (expected a bare host like example.com)")]
    InvalidHost(String),
}
