//! Comment endpoints

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{CommentResponse, CreateCommentRequest, SuccessResponse};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::service::Actor;

/// GET /api/videos/:id/comments
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(video_id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = state
        .engagement
        .list_comments(&session.user_id, &video_id)
        .await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// POST /api/videos/:id/comments
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(video_id): Path<String>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state
        .engagement
        .create_comment(&Actor::from(&session), &video_id, body.text, body.image)
        .await?;
    Ok(Json(comment.into()))
}

/// POST /api/comments/:id/like
pub async fn like(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .engagement
        .like_comment(&session.user_id, &comment_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/comments/:id/like
pub async fn unlike(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(comment_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .engagement
        .unlike_comment(&session.user_id, &comment_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
