//! Feed, publishing, views and video likes

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{PublishVideoRequest, SuccessResponse, VideoResponse, WatchRequest};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::service::{Actor, VideoView};

/// GET /api/videos/feed
pub async fn feed(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<VideoResponse>>, AppError> {
    let ranked = state.feed.feed(&session.user_id).await?;
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}

/// POST /api/videos
pub async fn publish(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<PublishVideoRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    let video = state
        .feed
        .publish(&Actor::from(&session), body.video_url, body.title)
        .await?;

    Ok(Json(
        VideoView {
            video,
            viewer_has_liked: false,
        }
        .into(),
    ))
}

/// POST /api/videos/:id/view
pub async fn record_view(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(video_id): Path<String>,
    Json(body): Json<WatchRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .feed
        .record_view(&session.user_id, &video_id, body.watch_duration)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/videos/:id/like
pub async fn like(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(video_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .engagement
        .like_video(&session.user_id, &video_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/videos/:id/like
pub async fn unlike(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(video_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .engagement
        .unlike_video(&session.user_id, &video_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
