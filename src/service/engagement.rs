//! Engagement service
//!
//! Likes on videos and comments, and comments with owner notification.
//!
//! Each operation writes the (user, target) record first and then
//! adjusts the target's counter in a separate statement. Pair
//! uniqueness is enforced by the store, so of two concurrent likes only
//! one reaches the counter update.

use std::sync::Arc;

use chrono::Utc;

use super::{Actor, CommentView, NotificationService, UNKNOWN_USERNAME};
use crate::data::{Comment, Database, EntityId, NotificationKind, Video};
use crate::error::AppError;

/// Comments returned per video
const COMMENT_PAGE_LIMIT: usize = 1000;

const COMMENT_NOTIFICATION_TEXT: &str = "commented on your video";

/// Engagement service
pub struct EngagementService {
    db: Arc<Database>,
    notifications: Arc<NotificationService>,
}

impl EngagementService {
    /// Create new engagement service
    pub fn new(db: Arc<Database>, notifications: Arc<NotificationService>) -> Self {
        Self { db, notifications }
    }

    async fn require_video(&self, video_id: &str) -> Result<Video, AppError> {
        self.db.get_video(video_id).await?.ok_or(AppError::NotFound)
    }

    async fn require_comment(&self, comment_id: &str) -> Result<Comment, AppError> {
        self.db
            .get_comment(comment_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    // =========================================================================
    // Video likes
    // =========================================================================

    /// Like a video
    ///
    /// # Errors
    /// `NotFound` for an unknown video, `AlreadyLiked` if the pair exists
    pub async fn like_video(&self, user_id: &str, video_id: &str) -> Result<(), AppError> {
        self.require_video(video_id).await?;

        if !self.db.insert_like(user_id, video_id).await? {
            return Err(AppError::AlreadyLiked);
        }
        self.db.increment_video_likes(video_id).await?;

        crate::metrics::LIKES_TOTAL
            .with_label_values(&["video", "like"])
            .inc();
        tracing::debug!(user_id = %user_id, video_id = %video_id, "Video liked");

        Ok(())
    }

    /// Remove a like from a video
    ///
    /// # Errors
    /// `NotFound` for an unknown video, `NotLiked` if there is no like
    pub async fn unlike_video(&self, user_id: &str, video_id: &str) -> Result<(), AppError> {
        self.require_video(video_id).await?;

        if !self.db.delete_like(user_id, video_id).await? {
            return Err(AppError::NotLiked);
        }
        self.db.decrement_video_likes(video_id).await?;

        crate::metrics::LIKES_TOTAL
            .with_label_values(&["video", "unlike"])
            .inc();
        tracing::debug!(user_id = %user_id, video_id = %video_id, "Video unliked");

        Ok(())
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Comment on a video and notify its owner
    ///
    /// The comment, the counter bump and the notification are three
    /// separate writes. Videos without an owner still get a notification
    /// record, addressed to nobody.
    pub async fn create_comment(
        &self,
        author: &Actor,
        video_id: &str,
        text: String,
        image: Option<String>,
    ) -> Result<CommentView, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Comment text cannot be empty".to_string()));
        }

        let video = self.require_video(video_id).await?;

        let comment = Comment {
            id: EntityId::new().0,
            video_id: video.id.clone(),
            user_id: author.id.clone(),
            text,
            image: image.filter(|image| !image.is_empty()),
            likes_count: 0,
            created_at: Utc::now(),
        };
        self.db.insert_comment(&comment).await?;
        self.db.increment_video_comments(&video.id).await?;

        self.notifications
            .notify(
                video.owner_id.as_deref(),
                NotificationKind::Comment,
                author,
                COMMENT_NOTIFICATION_TEXT,
                Some(&video.id),
            )
            .await?;

        crate::metrics::COMMENTS_CREATED_TOTAL.inc();
        tracing::info!(comment_id = %comment.id, video_id = %video.id, "Comment created");

        Ok(CommentView {
            comment,
            author_name: author.name.clone(),
            viewer_has_liked: false,
        })
    }

    /// Newest-first comments on a video, annotated for `viewer_id`
    pub async fn list_comments(
        &self,
        viewer_id: &str,
        video_id: &str,
    ) -> Result<Vec<CommentView>, AppError> {
        self.require_video(video_id).await?;

        let comments = self
            .db
            .get_comments_by_video(video_id, COMMENT_PAGE_LIMIT)
            .await?;

        let comment_ids: Vec<String> = comments.iter().map(|c| c.id.clone()).collect();
        let mut author_ids: Vec<String> = comments.iter().map(|c| c.user_id.clone()).collect();
        author_ids.sort();
        author_ids.dedup();

        let usernames = self.db.get_usernames_batch(&author_ids).await?;
        let liked = self
            .db
            .get_liked_comment_ids_batch(viewer_id, &comment_ids)
            .await?;

        Ok(comments
            .into_iter()
            .map(|comment| CommentView {
                author_name: usernames
                    .get(&comment.user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
                viewer_has_liked: liked.contains(&comment.id),
                comment,
            })
            .collect())
    }

    // =========================================================================
    // Comment likes
    // =========================================================================

    pub async fn like_comment(&self, user_id: &str, comment_id: &str) -> Result<(), AppError> {
        self.require_comment(comment_id).await?;

        if !self.db.insert_comment_like(user_id, comment_id).await? {
            return Err(AppError::AlreadyLiked);
        }
        self.db.increment_comment_likes(comment_id).await?;

        crate::metrics::LIKES_TOTAL
            .with_label_values(&["comment", "like"])
            .inc();

        Ok(())
    }

    pub async fn unlike_comment(&self, user_id: &str, comment_id: &str) -> Result<(), AppError> {
        self.require_comment(comment_id).await?;

        if !self.db.delete_comment_like(user_id, comment_id).await? {
            return Err(AppError::NotLiked);
        }
        self.db.decrement_comment_likes(comment_id).await?;

        crate::metrics::LIKES_TOTAL
            .with_label_values(&["comment", "unlike"])
            .inc();

        Ok(())
    }
}
