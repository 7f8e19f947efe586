use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::{Duration, Utc};
use perch_types::{EnrichedPost, TrendingHashtag, UserStatistics};
use serde::Deserialize;

use super::{authenticate, parse_cursor, ApiError, ApiResult};
use crate::state::AppState;

fn default_amount() -> i64 {
    10
}

#[derive(Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    oldest_date: Option<String>,
    #[serde(default = "default_amount")]
    amount: i64,
}

/// GET /feed - the viewer's composed feed page
pub async fn get_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<EnrichedPost>>> {
    let viewer = authenticate(&state, &headers).await?;
    let oldest = parse_cursor(query.oldest_date.as_deref())?;

    let posts = state.feed.get_feed(viewer.id, oldest, query.amount).await?;
    Ok(Json(posts))
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    oldest_date: Option<String>,
    #[serde(default = "default_amount")]
    amount: i64,
    #[serde(default)]
    only_reposts: bool,
}

/// GET /users/:id/posts - a visited profile's posts (or only its reposts)
pub async fn get_profile_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(visited): Path<i64>,
    Query(query): Query<ProfileQuery>,
) -> ApiResult<Json<Vec<EnrichedPost>>> {
    let viewer = authenticate(&state, &headers).await?;
    let oldest = parse_cursor(query.oldest_date.as_deref())?;

    let posts = state.feed.get_profile_posts(
        viewer.id,
        visited,
        oldest,
        query.amount,
        query.only_reposts,
    )?;
    Ok(Json(posts))
}

/// GET /users/:id/favorites - originals the visited user bookmarked
pub async fn get_user_favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(visited): Path<i64>,
    Query(query): Query<ProfileQuery>,
) -> ApiResult<Json<Vec<EnrichedPost>>> {
    let viewer = authenticate(&state, &headers).await?;
    let oldest = parse_cursor(query.oldest_date.as_deref())?;

    let posts = state
        .feed
        .get_favorites_of(viewer.id, visited, oldest, query.amount)?;
    Ok(Json(posts))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    hashtags: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    offset: i64,
    #[serde(default = "default_amount")]
    amount: i64,
}

/// GET /posts/search - posts by hashtags (comma-separated) or by substring
pub async fn search_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<EnrichedPost>>> {
    let viewer = authenticate(&state, &headers).await?;

    let posts = match (query.hashtags.as_deref(), query.text.as_deref()) {
        (Some(hashtags), _) => {
            let tags: Vec<String> = hashtags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            state
                .feed
                .get_posts_by_hashtags(viewer.id, &tags, query.offset, query.amount)?
        }
        (None, Some(text)) => {
            state
                .feed
                .get_posts_by_text(viewer.id, text, query.offset, query.amount)?
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either 'hashtags' or 'text' is required".to_string(),
            ))
        }
    };
    Ok(Json(posts))
}

#[derive(Deserialize)]
pub struct StatisticsQuery {
    from_date: String,
    to_date: String,
}

/// GET /statistics - the viewer's activity counters over a window
pub async fn get_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<Json<UserStatistics>> {
    let viewer = authenticate(&state, &headers).await?;
    let from = parse_cursor(Some(&query.from_date))?;
    let to = parse_cursor(Some(&query.to_date))?;

    let stats = state.feed.get_statistics(viewer.id, from, to)?;
    Ok(Json(stats))
}

#[derive(Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    offset: i64,
    #[serde(default = "default_amount")]
    amount: i64,
}

/// GET /admin/posts - unfiltered listing, admin-only, hard page cap
pub async fn get_admin_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminQuery>,
) -> ApiResult<Json<Vec<EnrichedPost>>> {
    let viewer = authenticate(&state, &headers).await?;
    if !viewer.admin {
        return Err(crate::db::StoreError::PermissionDenied.into());
    }

    let posts = state.feed.get_posts_for_admin(query.offset, query.amount)?;
    Ok(Json(posts))
}

#[derive(Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    offset: i64,
    #[serde(default = "default_amount")]
    amount: i64,
    /// Window size in hours; defaults to the last 24.
    #[serde(default = "default_window_hours")]
    window_hours: i64,
}

fn default_window_hours() -> i64 {
    24
}

/// GET /hashtags/trending - most used hashtags over a recent window
pub async fn get_trending_hashtags(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TrendingQuery>,
) -> ApiResult<Json<Vec<TrendingHashtag>>> {
    authenticate(&state, &headers).await?;
    let since = Utc::now() - Duration::hours(query.window_hours.max(1));

    let trending = state
        .feed
        .get_trending_hashtags(since, query.amount, query.offset)?;
    Ok(Json(trending))
}
