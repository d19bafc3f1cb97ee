//! Error types for Vyzo
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// Every variant maps to an HTTP status and a stable machine-readable
/// `kind` string. Nothing here is retried internally; a failed request
/// is reported to the caller as-is.
#[derive(Debug, Error)]
pub enum AppError {
    /// Like requested on a target the user already likes (400)
    #[error("Already liked")]
    AlreadyLiked,

    /// Unlike requested on a target the user does not like (400)
    #[error("Not liked")]
    NotLiked,

    /// Follow edge already exists (400)
    #[error("Already following")]
    AlreadyFollowing,

    /// Unfollow without an existing edge (400)
    #[error("Not following")]
    NotFollowing,

    /// Follower and followee are the same user (400)
    #[error("Cannot follow yourself")]
    SelfFollowForbidden,

    /// Registration with an email that is already in use (400)
    #[error("Email already registered")]
    EmailTaken,

    /// Validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity absent (404)
    #[error("Resource not found")]
    NotFound,

    /// Authentication required or rejected (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Login with a wrong email/password pair (401)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::AlreadyLiked => "already_liked",
            AppError::NotLiked => "not_liked",
            AppError::AlreadyFollowing => "already_following",
            AppError::NotFollowing => "not_following",
            AppError::SelfFollowForbidden => "self_follow_forbidden",
            AppError::EmailTaken => "email_taken",
            AppError::Validation(_) => "validation",
            AppError::NotFound => "not_found",
            AppError::Unauthorized => "unauthorized",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::Database(_) => "database",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AlreadyLiked
            | AppError::NotLiked
            | AppError::AlreadyFollowing
            | AppError::NotFollowing
            | AppError::SelfFollowForbidden
            | AppError::EmailTaken
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Body is `{"error": <human text>, "kind": <stable kind>}`.
    /// Server-side failures are logged and their details withheld.
    fn into_response(self) -> Response {
        use axum::Json;

        let status = self.status();
        let kind = self.kind();
        let error_message = match &self {
            AppError::Database(error) => {
                tracing::error!(%error, "Database error");
                "Database error".to_string()
            }
            AppError::Internal(error) => {
                tracing::error!(%error, "Internal error");
                "Internal server error".to_string()
            }
            AppError::Validation(msg) | AppError::Config(msg) => msg.clone(),
            _ => self.to_string(),
        };

        crate::metrics::ERRORS_TOTAL.with_label_values(&[kind]).inc();

        let body = Json(serde_json::json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_errors_are_bad_requests_with_stable_kinds() {
        let cases = [
            (AppError::AlreadyLiked, "already_liked"),
            (AppError::NotLiked, "not_liked"),
            (AppError::AlreadyFollowing, "already_following"),
            (AppError::NotFollowing, "not_following"),
            (AppError::SelfFollowForbidden, "self_follow_forbidden"),
        ];

        for (error, kind) in cases {
            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn not_found_and_unauthorized_statuses() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn into_response_uses_error_status() {
        let response = AppError::SelfFollowForbidden.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
