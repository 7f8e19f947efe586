//! Identity collaborator: resolves opaque tokens into user identities.
//!
//! Identity is owned by an external service; this client is the only thing
//! in the engine that talks to it. Auth failures stay distinct from feed
//! errors so an expired token can never read as a 404 or an empty feed.

use perch_types::AuthenticatedUser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve a token into the authenticated user behind it.
    pub async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .http
            .get(format!("{}/users/me", self.base_url))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(|err| AuthError::ServiceUnavailable(err.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidToken);
        }
        if !response.status().is_success() {
            return Err(AuthError::ServiceUnavailable(format!(
                "identity service returned {}",
                response.status()
            )));
        }

        response
            .json::<AuthenticatedUser>()
            .await
            .map_err(|err| AuthError::ServiceUnavailable(err.to_string()))
    }
}
