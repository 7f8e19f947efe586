use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Custom serde module so timestamps serialize in the same fixed-width
// RFC3339 form the storage layer uses.
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&crate::timestamp::to_store(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::timestamp::from_store(&s).map_err(serde::de::Error::custom)
    }
}

/// A user row mirrored from the identity service. Identity (ids, emails,
/// usernames) is owned externally; the local row exists for join purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_public: bool,
    pub blocked: bool,
    pub location: String,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

/// The identity pair carried on every enriched post, for both the poster
/// and the creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

/// Immutable payload of a post. Shared (not copied) between an original
/// post and all of its reposts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub content_id: i64,
    pub text: Option<String>,
    pub image: Option<String>,
}

/// A post row. An original has `user_poster_id == user_creator_id`; a repost
/// is a second row pointing at the same content with a different poster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub user_poster_id: i64,
    pub user_creator_id: i64,
    pub content_id: i64,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_repost(&self) -> bool {
        self.user_poster_id != self.user_creator_id
    }
}

/// A post decorated for a specific viewer: aggregate counts, tag lists, and
/// the viewer's own interaction flags. This is the only shape the feed
/// engine returns; rows are never exposed as positional tuples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPost {
    pub post_id: i64,
    pub poster: UserSummary,
    pub creator: UserSummary,
    pub content_id: i64,
    pub text: Option<String>,
    pub image: Option<String>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<i64>,
    pub number_likes: i64,
    pub number_reposts: i64,
    pub did_i_like: bool,
    pub did_i_repost: bool,
    pub did_i_favorite: bool,
}

impl EnrichedPost {
    /// True when this row represents "poster reposted creator" rather than
    /// a plain post.
    pub fn is_repost(&self) -> bool {
        self.poster.id != self.creator.id
    }
}

/// Per-user activity counters over a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatistics {
    pub my_posts_count: i64,
    pub my_reposts_count: i64,
    pub others_reposts_count: i64,
    pub likes_count: i64,
}

/// A hashtag with its usage count, for the trending listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingHashtag {
    pub hashtag: String,
    pub uses: i64,
}

/// The identity the auth collaborator resolves a token into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

// Request/Response types for the API

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub location: String,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetInterestsRequest {
    pub interests: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
