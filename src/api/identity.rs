//! Request Identity
//!
//! Extracts the per-user partition key from the `x-user-id` header. There is
//! no authentication; clients are trusted to name themselves, and requests
//! without a usable header share one demo identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Identity used when no `x-user-id` header is sent
pub const DEMO_USER_ID: &str = "demo-user";

/// The user a request acts on behalf of
#[derive(Debug, Clone)]
pub struct UserIdentity(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEMO_USER_ID);

        Ok(Self(user_id.to_string()))
    }
}
