//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services orchestrate database writes, counter updates and
//! notification fan-out.

mod account;
mod engagement;
mod feed;
mod message;
mod notification;
mod search;
mod social;

pub use account::{AccountService, NewAccount};
pub use engagement::EngagementService;
pub use feed::{FeedService, rank_feed};
pub use message::MessageService;
pub use notification::NotificationService;
pub use search::SearchService;
pub use social::SocialService;

use crate::auth::Session;
use crate::data::{Comment, Message, User, Video};

/// User performing an action
///
/// `name` is denormalized into notifications at creation time.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl From<&Session> for Actor {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user_id.clone(),
            name: session.username.clone(),
        }
    }
}

/// Video annotated for one viewer
#[derive(Debug, Clone)]
pub struct VideoView {
    pub video: Video,
    pub viewer_has_liked: bool,
}

/// Comment annotated for one viewer
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author_name: String,
    pub viewer_has_liked: bool,
}

/// Direct message with the sender's display name
#[derive(Debug, Clone)]
pub struct MessageView {
    pub message: Message,
    pub sender_name: String,
}

/// Combined search result
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub videos: Vec<VideoView>,
    pub users: Vec<User>,
}

impl SearchResults {
    pub fn total_count(&self) -> usize {
        self.videos.len() + self.users.len()
    }
}

/// Name shown when a referenced user no longer resolves
pub(crate) const UNKNOWN_USERNAME: &str = "Unknown";
