//! Notification endpoints

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{NotificationResponse, SuccessResponse, UnreadCountResponse};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    let notifications = state.notifications.list(&session.user_id).await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// GET /api/notifications/unread_count
pub async fn unread_count(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let count = state.notifications.unread_count(&session.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// POST /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(notification_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .notifications
        .mark_read(&notification_id, &session.user_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
