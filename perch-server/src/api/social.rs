use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use perch_types::{CreateUserRequest, SetInterestsRequest, User};

use super::{authenticate, ApiResult};
use crate::db::repositories::{FollowRepository, InterestRepository, UserRepository};
use crate::state::AppState;

/// POST /users - mirror a user row from the identity service
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    authenticate(&state, &headers).await?;

    let user = UserRepository::new(state.db.pool.clone()).create(
        &payload.email,
        &payload.username,
        payload.is_public,
        &payload.location,
    )?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users/:id/follow
pub async fn follow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(followed): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    FollowRepository::new(state.db.pool.clone()).follow(viewer.id, followed)?;
    Ok(StatusCode::CREATED)
}

/// DELETE /users/:id/follow - idempotent
pub async fn unfollow_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(followed): Path<i64>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    FollowRepository::new(state.db.pool.clone()).unfollow(viewer.id, followed)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /social/following - ids the viewer follows
pub async fn get_following(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<i64>>> {
    let viewer = authenticate(&state, &headers).await?;
    let following = FollowRepository::new(state.db.pool.clone()).get_following(viewer.id)?;
    Ok(Json(following))
}

/// GET /social/followers - ids following the viewer
pub async fn get_followers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<i64>>> {
    let viewer = authenticate(&state, &headers).await?;
    let followers = FollowRepository::new(state.db.pool.clone()).get_followers(viewer.id)?;
    Ok(Json(followers))
}

/// PUT /interests - replace the viewer's declared interests
pub async fn set_interests(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SetInterestsRequest>,
) -> ApiResult<StatusCode> {
    let viewer = authenticate(&state, &headers).await?;
    InterestRepository::new(state.db.pool.clone()).set_interests(viewer.id, &payload.interests)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /interests
pub async fn get_interests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<String>>> {
    let viewer = authenticate(&state, &headers).await?;
    let interests = InterestRepository::new(state.db.pool.clone()).get_interests(viewer.id)?;
    Ok(Json(interests))
}
