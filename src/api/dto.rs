//! Data Transfer Objects for the HTTP API
//!
//! Request bodies and JSON response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{HotSearch, Notification, SearchHistoryEntry, User};
use crate::service::{CommentView, MessageView, SearchResults, VideoView};

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishVideoRequest {
    pub video_url: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct WatchRequest {
    pub watch_duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
    /// Base64-encoded image
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: String,
    #[serde(default)]
    pub text: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    #[serde(default)]
    pub keyword: String,
}

// =============================================================================
// Responses
// =============================================================================

/// Generic acknowledgement body
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            bio: user.bio,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: User) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            user: user.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub id: String,
    pub video_url: String,
    pub title: String,
    pub author: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub is_liked: bool,
}

impl From<VideoView> for VideoResponse {
    fn from(view: VideoView) -> Self {
        let video = view.video;
        Self {
            id: video.id,
            video_url: video.video_url,
            title: video.title,
            author: video.author,
            likes_count: video.likes_count,
            comments_count: video.comments_count,
            views: video.views,
            created_at: video.created_at,
            is_liked: view.viewer_has_liked,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub text: String,
    pub image: Option<String>,
    pub likes_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        let comment = view.comment;
        Self {
            id: comment.id,
            user_id: comment.user_id,
            username: view.author_name,
            text: comment.text,
            image: comment.image,
            likes_count: comment.likes_count,
            is_liked: view.viewer_has_liked,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub sender_username: String,
    pub receiver_id: String,
    pub text: String,
    pub image: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageView> for MessageResponse {
    fn from(view: MessageView) -> Self {
        let message = view.message;
        Self {
            id: message.id,
            sender_id: message.sender_id,
            sender_username: view.sender_name,
            receiver_id: message.receiver_id,
            text: message.text,
            image: message.image,
            read: message.read,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub from_user_id: String,
    pub from_username: String,
    pub content: String,
    pub video_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            notification_type: notification.kind,
            from_user_id: notification.actor_id,
            from_username: notification.actor_name,
            content: notification.content,
            video_id: notification.video_id,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResultResponse {
    pub videos: Vec<VideoResponse>,
    pub users: Vec<UserResponse>,
    pub total_count: usize,
}

impl From<SearchResults> for SearchResultResponse {
    fn from(results: SearchResults) -> Self {
        let total_count = results.total_count();
        Self {
            videos: results.videos.into_iter().map(Into::into).collect(),
            users: results.users.into_iter().map(Into::into).collect(),
            total_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchHistoryResponse {
    pub id: String,
    pub keyword: String,
    pub created_at: DateTime<Utc>,
}

impl From<SearchHistoryEntry> for SearchHistoryResponse {
    fn from(entry: SearchHistoryEntry) -> Self {
        Self {
            id: entry.id,
            keyword: entry.keyword,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HotSearchResponse {
    pub keyword: String,
    pub count: i64,
}

impl From<HotSearch> for HotSearchResponse {
    fn from(hot: HotSearch) -> Self {
        Self {
            keyword: hot.keyword,
            count: hot.count,
        }
    }
}
