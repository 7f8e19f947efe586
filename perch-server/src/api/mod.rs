pub mod error;
pub mod feed;
pub mod posts;
pub mod social;

pub use error::{ApiError, ApiResult};

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use perch_types::{timestamp, AuthenticatedUser};

use crate::state::AppState;

/// Resolve the bearer token on the request into a user identity.
pub(crate) async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, ApiError> {
    let token = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Auth(crate::auth::AuthError::InvalidToken))?;

    Ok(state.identity.resolve(token).await?)
}

/// Parse an optional RFC3339 query parameter, defaulting to `now` (feeds
/// are consumed strictly newest-to-oldest, so "now" is the first cursor).
pub(crate) fn parse_cursor(raw: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => timestamp::from_store(raw)
            .map_err(|_| ApiError::BadRequest(format!("invalid timestamp: {raw}"))),
    }
}
