use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use perch_types::ErrorResponse;

use crate::auth::AuthError;
use crate::db::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    Auth(AuthError),
    BadRequest(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match self {
            ApiError::Store(err) => (store_status(&err), err.to_string()),
            ApiError::Auth(err) => {
                let status = match err {
                    AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                    AuthError::ServiceUnavailable(_) => StatusCode::BAD_GATEWAY,
                };
                (status, err.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        if status.is_server_error() {
            tracing::error!("request failed: {details}");
        }

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            details: Some(details),
        };
        (status, Json(body)).into_response()
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::PostNotFound
        | StoreError::UserNotFound
        | StoreError::LikeNotFound
        | StoreError::FavoriteNotFound
        | StoreError::RepostNotFound => StatusCode::NOT_FOUND,

        StoreError::UserIsPrivate
        | StoreError::ViewerBlocked
        | StoreError::PermissionDenied => StatusCode::FORBIDDEN,
        // Distinct from the viewer's own account being blocked.
        StoreError::AuthorBlocked => StatusCode::METHOD_NOT_ALLOWED,

        StoreError::RepostAlreadyMade => StatusCode::CONFLICT,

        StoreError::SelfFollow
        | StoreError::InvalidAmount
        | StoreError::PageTooLarge
        | StoreError::EmptyPost
        | StoreError::TextTooLong => StatusCode::BAD_REQUEST,

        StoreError::Timeout => StatusCode::GATEWAY_TIMEOUT,

        StoreError::Database(_) if err.is_constraint_violation() => StatusCode::BAD_REQUEST,
        StoreError::ContentMissing(_)
        | StoreError::Internal(_)
        | StoreError::Database(_)
        | StoreError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
