//! Direct message endpoints

use axum::{Json, extract::State};

use super::dto::{MessageResponse, SendMessageRequest};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::service::Actor;

/// GET /api/messages
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let messages = state.messages.conversations(&session.user_id).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

/// POST /api/messages
pub async fn send(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = state
        .messages
        .send(&Actor::from(&session), &body.receiver_id, body.text, body.image)
        .await?;
    Ok(Json(message.into()))
}
