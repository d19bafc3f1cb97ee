//! Data models
//!
//! Rust structs representing database entities.
//! All models use ULID for IDs and chrono for timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Entity ID wrapper (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Salted SHA-256 hash, see `auth::password`
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub username: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Video
// =============================================================================

/// A video in the catalogue
///
/// Counters are denormalized; they are bumped by separate statements
/// after the underlying like/comment/view record is written.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: String,
    pub video_url: String,
    pub title: String,
    /// Display author (free text, e.g. "Blender Foundation")
    pub author: String,
    /// Publishing user, `None` for catalogue videos nobody owns
    pub owner_id: Option<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// `likes*2 + comments*3 + views`
    pub fn engagement_score(&self) -> i64 {
        self.likes_count * 2 + self.comments_count * 3 + self.views
    }
}

/// One view of a video (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchEvent {
    pub id: String,
    pub user_id: String,
    pub video_id: String,
    /// Seconds watched
    pub watch_duration: f64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub video_id: String,
    /// Author user ID
    pub user_id: String,
    pub text: String,
    /// Base64-encoded image payload
    pub image: Option<String>,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Follow relationships
// =============================================================================

/// Directed follow edge
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Notifications
// =============================================================================

/// Notification produced by another user's action
///
/// Immutable except for `read`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: String,
    /// `None` when the target had no owner to notify
    pub recipient_id: Option<String>,
    /// Type: follow, like, comment
    pub kind: String,
    pub actor_id: String,
    pub actor_name: String,
    pub content: String,
    pub video_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Like => "like",
            Self::Comment => "comment",
        }
    }
}

// =============================================================================
// Direct messages
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    pub image: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Search
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SearchHistoryEntry {
    pub id: String,
    pub user_id: String,
    pub keyword: String,
    pub created_at: DateTime<Utc>,
}

/// Global search frequency for one keyword
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HotSearch {
    pub keyword: String,
    pub count: i64,
}

/// Which result sets a search should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    All,
    Video,
    User,
}

impl SearchCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "video" => Some(Self::Video),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Video => "video",
            Self::User => "user",
        }
    }

    pub fn includes_videos(&self) -> bool {
        matches!(self, Self::All | Self::Video)
    }

    pub fn includes_users(&self) -> bool {
        matches!(self, Self::All | Self::User)
    }
}
