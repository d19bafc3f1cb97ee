//! Vyzo - short-video social backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - Accounts, feed, engagement, social, search endpoints     │
//! │  - Metrics endpoint                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Feed ranking and view recording                          │
//! │  - Likes, comments, follows with notification fan-out       │
//! │  - Search, history and hot searches                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - SQLite (sqlx)                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers
//! - `service`: Business logic layer
//! - `data`: Database layer
//! - `auth`: Session tokens and password hashing
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;

use std::sync::Arc;

use service::{
    AccountService, EngagementService, FeedService, MessageService, NotificationService,
    SearchService, SocialService,
};

/// Application state shared across all handlers
///
/// Cloned for each request. Services are built once over the same
/// database handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Database connection pool
    pub db: Arc<data::Database>,

    pub accounts: Arc<AccountService>,
    pub feed: Arc<FeedService>,
    pub engagement: Arc<EngagementService>,
    pub social: Arc<SocialService>,
    pub notifications: Arc<NotificationService>,
    pub search: Arc<SearchService>,
    pub messages: Arc<MessageService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to SQLite database
    /// 2. Build services
    /// 3. Seed the sample catalogue if enabled and empty
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        // 1. Connect to SQLite database
        let db = Arc::new(data::Database::connect(&config.database.path).await?);
        tracing::info!(path = %config.database.path.display(), "Database connected");

        // 2. Build services
        let notifications = Arc::new(NotificationService::new(db.clone()));
        let feed = Arc::new(FeedService::new(db.clone()));

        // 3. Seed sample catalogue
        if config.feed.seed_sample_videos {
            feed.seed_sample_videos().await?;
        }

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            accounts: Arc::new(AccountService::new(db.clone())),
            engagement: Arc::new(EngagementService::new(db.clone(), notifications.clone())),
            social: Arc::new(SocialService::new(db.clone(), notifications.clone())),
            search: Arc::new(SearchService::new(db.clone())),
            messages: Arc::new(MessageService::new(db.clone())),
            feed,
            notifications,
            config: Arc::new(config),
            db,
        })
    }
}

/// Upper bound for request bodies; comments and messages carry base64 images
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::{Router, extract::DefaultBodyLimit};
    use tower_http::{
        compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
        trace::TraceLayer,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/api", api::api_router())
        .layer(axum::middleware::from_fn(api::metrics::track_http_metrics))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(api::metrics_router())
}

async fn health_check() -> &'static str {
    "OK"
}
