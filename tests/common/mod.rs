//! Common test utilities for E2E tests

#![allow(dead_code)]

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use vyzo::{AppState, config};

pub const TEST_SESSION_SECRET: &str = "test-secret-key-that-is-32-bytes!";

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

/// Registered user with a bearer token
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

fn test_config(temp_dir: &TempDir, seed_sample_videos: bool) -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Let OS assign port
        },
        database: config::DatabaseConfig {
            path: temp_dir.path().join("test.db"),
        },
        auth: config::AuthConfig {
            session_secret: TEST_SESSION_SECRET.to_string(),
            session_max_age: 604800,
        },
        feed: config::FeedConfig { seed_sample_videos },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}

impl TestServer {
    /// Create a new test server with an empty catalogue
    pub async fn new() -> Self {
        Self::start(false).await
    }

    /// Create a new test server with the sample catalogue seeded
    pub async fn with_sample_videos() -> Self {
        Self::start(true).await
    }

    async fn start(seed_sample_videos: bool) -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir, seed_sample_videos);

        vyzo::metrics::init_metrics();

        // Initialize app state
        let state = AppState::new(config).await.unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = vyzo::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr: format!("http://{}", addr),
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Register a user through the API
    pub async fn register(&self, username: &str) -> TestUser {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "email": format!("{}@example.com", username),
                "password": "SecurePass123!",
                "username": username,
                "bio": format!("{} bio", username),
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200, "registration of {} failed", username);

        let body: Value = response.json().await.unwrap();
        TestUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            username: username.to_string(),
            token: body["access_token"].as_str().unwrap().to_string(),
        }
    }

    /// Publish a video owned by `user`, returns its ID
    pub async fn publish_video(&self, user: &TestUser, title: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/videos"))
            .bearer_auth(&user.token)
            .json(&json!({
                "video_url": format!("https://videos.example.com/{}.mp4", title.replace(' ', "")),
                "title": title,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    /// GET with bearer token, returns status and JSON body
    pub async fn get_json(&self, user: &TestUser, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&user.token)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    /// POST JSON with bearer token, returns status and JSON body
    pub async fn post_json(&self, user: &TestUser, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&user.token)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    /// DELETE with bearer token, returns status and JSON body
    pub async fn delete(&self, user: &TestUser, path: &str) -> (u16, Value) {
        let response = self
            .client
            .delete(self.url(path))
            .bearer_auth(&user.token)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }
}
