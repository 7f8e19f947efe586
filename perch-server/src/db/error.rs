use rusqlite::ErrorCode;
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors surfaced by the storage and feed layers.
///
/// Every variant reflects data or authorization state, not transient
/// failure; only busy/locked write errors are retried (see
/// [`crate::db::with_write_retry`]). The HTTP mapping lives in
/// `api::error`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found")]
    PostNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("like not found")]
    LikeNotFound,
    #[error("favorite not found")]
    FavoriteNotFound,
    #[error("repost not found")]
    RepostNotFound,

    #[error("user is private")]
    UserIsPrivate,
    /// The requesting user's own account is blocked.
    #[error("this user is blocked")]
    ViewerBlocked,
    /// The account being accessed is blocked. Distinct from
    /// [`StoreError::ViewerBlocked`] so callers can render different
    /// messaging (403 vs 405).
    #[error("the other user is blocked")]
    AuthorBlocked,
    #[error("user does not have permission for that action")]
    PermissionDenied,

    #[error("user already reposted that content")]
    RepostAlreadyMade,
    #[error("users cannot follow themselves")]
    SelfFollow,

    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("page size exceeds the administrative maximum of 25")]
    PageTooLarge,
    #[error("both text and image are empty")]
    EmptyPost,
    #[error("text exceeds maximum length of 1000 characters")]
    TextTooLong,

    /// A post row exists without its content row. Integrity violation: the
    /// whole page fails rather than silently dropping the post.
    #[error("post {0} has no content row")]
    ContentMissing(i64),
    #[error("query deadline exceeded")]
    Timeout,
    #[error("feed worker failed: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Pool(#[from] r2d2::Error),
}

impl StoreError {
    /// True for unique/foreign-key/check violations raised by a write.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Database(rusqlite::Error::SqliteFailure(f, _))
                if f.code == ErrorCode::ConstraintViolation
        )
    }

    /// True when the underlying database was busy or locked; the only
    /// condition worth retrying.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            StoreError::Database(rusqlite::Error::SqliteFailure(f, _))
                if matches!(f.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        )
    }
}
