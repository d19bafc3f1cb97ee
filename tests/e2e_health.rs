//! E2E tests for health check and basic server functionality

mod common;

use common::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(&server.url("/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_api_banner() {
    let server = TestServer::new().await;

    let response = server.client.get(&server.url("/api")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Vyzo API v1.0");
}

#[tokio::test]
async fn test_cors_headers() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(&server.url("/health"))
        .header("Origin", "https://app.example.com")
        .send()
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;

    let response = server.client.get(&server.url("/metrics")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_metrics_count_engagement() {
    let server = TestServer::new().await;
    let sarah = server.register("sarah_creates").await;
    let mike = server.register("mike_watches").await;
    let video_id = server.publish_video(&sarah, "Morning Routine").await;

    let (status, _) = server
        .post_json(&mike, &format!("/api/videos/{}/like", video_id), json!({}))
        .await;
    assert_eq!(status, 200);
    let (status, _) = server
        .post_json(&mike, &format!("/api/users/{}/follow", sarah.id), json!({}))
        .await;
    assert_eq!(status, 200);

    let body = server
        .client
        .get(&server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("vyzo_likes_total{action=\"like\",target=\"video\"}"));
    assert!(body.contains("vyzo_follows_total{action=\"follow\"}"));
    assert!(body.contains("vyzo_http_requests_total"));
}

#[tokio::test]
async fn test_404_for_unknown_routes() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(&server.url("/unknown/route"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_sample_videos_seeded_on_startup() {
    let server = TestServer::with_sample_videos().await;

    assert_eq!(server.state.db.count_videos().await.unwrap(), 5);
}
