use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use perch_types::{CreatePostRequest, EnrichedPost, Post, UpdatePostRequest};

use super::{authenticate, ApiResult};
use crate::state::AppState;

/// POST /posts - create an original post
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let viewer = authenticate(&state, &headers).await?;

    let post = state
        .feed
        .create_post(viewer.id, payload.text.as_deref(), payload.image.as_deref())?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/:id - a single post, enriched for the viewer
pub async fn get_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<EnrichedPost>> {
    let viewer = authenticate(&state, &headers).await?;
    let post = state.feed.get_post_by_id(viewer.id, post_id)?;
    Ok(Json(post))
}

/// PUT /posts/:id - rewrite an original post's payload
pub async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;

    state.feed.update_post(
        viewer.id,
        post_id,
        payload.text.as_deref(),
        payload.image.as_deref(),
    )?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /posts/:id - delete an original and everything hanging off it
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    state.feed.delete_post(viewer.id, post_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/:id/repost
pub async fn create_repost(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let viewer = authenticate(&state, &headers).await?;
    let repost = state.feed.repost(viewer.id, post_id)?;
    Ok((StatusCode::CREATED, Json(repost)))
}

/// DELETE /posts/:id/repost
pub async fn delete_repost(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    state.feed.unrepost(viewer.id, post_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/:id/like
pub async fn create_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    state.feed.like(viewer.id, post_id)?;
    Ok(StatusCode::CREATED)
}

/// DELETE /posts/:id/like
pub async fn delete_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    state.feed.unlike(viewer.id, post_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/:id/favorite
pub async fn create_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    state.feed.favorite(viewer.id, post_id)?;
    Ok(StatusCode::CREATED)
}

/// DELETE /posts/:id/favorite
pub async fn delete_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    state.feed.unfavorite(viewer.id, post_id)?;
    Ok(StatusCode::NO_CONTENT)
}
