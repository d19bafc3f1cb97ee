//! API layer
//!
//! HTTP handlers for:
//! - Accounts and sessions
//! - Feed, views, likes and comments
//! - Follows, messages and notifications
//! - Search
//! - Metrics (Prometheus)

mod auth;
mod comments;
mod dto;
pub mod metrics;
mod messages;
mod notifications;
mod search;
mod users;
mod videos;

pub use dto::*;
pub use metrics::metrics_router;

use axum::{
    Json, Router,
    routing::{get, post},
};

use crate::AppState;

/// Create the `/api` router
///
/// Every route except registration, login, the banner and hot searches
/// requires a bearer token; the `CurrentUser` extractor enforces it.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        // Accounts
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Videos
        .route("/videos", post(videos::publish))
        .route("/videos/feed", get(videos::feed))
        .route("/videos/:id/view", post(videos::record_view))
        .route("/videos/:id/like", post(videos::like).delete(videos::unlike))
        // Comments
        .route(
            "/videos/:id/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/comments/:id/like",
            post(comments::like).delete(comments::unlike),
        )
        // Social graph
        .route("/users/:id/follow", post(users::follow).delete(users::unfollow))
        // Messages
        .route("/messages", get(messages::list).post(messages::send))
        // Notifications
        .route("/notifications", get(notifications::list))
        .route(
            "/notifications/unread_count",
            get(notifications::unread_count),
        )
        .route("/notifications/:id/read", post(notifications::mark_read))
        // Search
        .route("/search", get(search::search))
        .route(
            "/search/history",
            get(search::history)
                .post(search::record)
                .delete(search::clear_history),
        )
        .route(
            "/search/history/:id",
            axum::routing::delete(search::delete_entry),
        )
        .route("/search/hot", get(search::hot))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Vyzo API v1.0" }))
}
