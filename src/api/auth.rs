//! Registration, login and current-user endpoints

use axum::{Json, extract::State};

use super::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::AppState;
use crate::auth::{CurrentUser, Session, create_session_token};
use crate::data::User;
use crate::error::AppError;
use crate::service::NewAccount;

fn issue_token(state: &AppState, user: User) -> Result<TokenResponse, AppError> {
    let session = Session::start(&user.id, &user.username, state.config.auth.session_max_age);
    let token = create_session_token(&session, &state.config.auth.session_secret)?;
    Ok(TokenResponse::bearer(token, user))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state
        .accounts
        .register(NewAccount {
            email: body.email,
            password: body.password,
            username: body.username,
            bio: body.bio,
        })
        .await?;

    Ok(Json(issue_token(&state, user)?))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state.accounts.login(&body.email, &body.password).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(issue_token(&state, user)?))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.accounts.get(&session.user_id).await?;
    Ok(Json(user.into()))
}
