//! Follow endpoints

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::SuccessResponse;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::service::Actor;

/// POST /api/users/:id/follow
pub async fn follow(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.social.follow(&Actor::from(&session), &user_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/users/:id/follow
pub async fn unfollow(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.social.unfollow(&session.user_id, &user_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
