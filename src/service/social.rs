//! Social graph service
//!
//! Follow and unfollow, with a notification to the followed user.

use std::sync::Arc;

use chrono::Utc;

use super::{Actor, NotificationService};
use crate::data::{Database, EntityId, Follow, NotificationKind};
use crate::error::AppError;

const FOLLOW_NOTIFICATION_TEXT: &str = "started following you";

/// Social graph service
pub struct SocialService {
    db: Arc<Database>,
    notifications: Arc<NotificationService>,
}

impl SocialService {
    /// Create new social service
    pub fn new(db: Arc<Database>, notifications: Arc<NotificationService>) -> Self {
        Self { db, notifications }
    }

    /// Follow a user
    ///
    /// # Errors
    /// - `SelfFollowForbidden` when following oneself
    /// - `NotFound` for an unknown target
    /// - `AlreadyFollowing` if the edge exists
    pub async fn follow(&self, follower: &Actor, target_id: &str) -> Result<(), AppError> {
        if follower.id == target_id {
            return Err(AppError::SelfFollowForbidden);
        }

        self.db.get_user(target_id).await?.ok_or(AppError::NotFound)?;

        let follow = Follow {
            id: EntityId::new().0,
            follower_id: follower.id.clone(),
            following_id: target_id.to_string(),
            created_at: Utc::now(),
        };
        if !self.db.insert_follow(&follow).await? {
            return Err(AppError::AlreadyFollowing);
        }

        self.notifications
            .notify(
                Some(target_id),
                NotificationKind::Follow,
                follower,
                FOLLOW_NOTIFICATION_TEXT,
                None,
            )
            .await?;

        crate::metrics::FOLLOWS_TOTAL
            .with_label_values(&["follow"])
            .inc();
        tracing::info!(follower_id = %follower.id, target_id = %target_id, "Followed user");

        Ok(())
    }

    /// Remove a follow edge
    ///
    /// # Errors
    /// `NotFollowing` if the edge doesn't exist
    pub async fn unfollow(&self, follower_id: &str, target_id: &str) -> Result<(), AppError> {
        if !self.db.delete_follow(follower_id, target_id).await? {
            return Err(AppError::NotFollowing);
        }

        crate::metrics::FOLLOWS_TOTAL
            .with_label_values(&["unfollow"])
            .inc();
        tracing::info!(follower_id = %follower_id, target_id = %target_id, "Unfollowed user");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::User;
    use tempfile::TempDir;

    async fn setup() -> (SocialService, Arc<Database>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("service-social.db");
        let db = Arc::new(Database::connect(&db_path).await.unwrap());
        let notifications = Arc::new(NotificationService::new(db.clone()));
        (SocialService::new(db.clone(), notifications), db, temp_dir)
    }

    async fn seed_user(db: &Database, username: &str) -> Actor {
        let user = User {
            id: EntityId::new().0,
            email: format!("{}@example.com", username),
            password_hash: "salt$hash".to_string(),
            username: username.to_string(),
            bio: String::new(),
            avatar: None,
            created_at: Utc::now(),
        };
        db.insert_user(&user).await.unwrap();
        Actor {
            id: user.id,
            name: user.username,
        }
    }

    #[tokio::test]
    async fn follow_creates_edge_and_notification() {
        let (service, db, _temp_dir) = setup().await;
        let sarah = seed_user(&db, "sarah_creates").await;
        let mike = seed_user(&db, "mike_watches").await;

        service.follow(&mike, &sarah.id).await.unwrap();

        assert!(db.is_following(&mike.id, &sarah.id).await.unwrap());
        assert!(!db.is_following(&sarah.id, &mike.id).await.unwrap());

        let inbox = db.get_notifications(&sarah.id, 10).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, "follow");
        assert_eq!(inbox[0].actor_id, mike.id);
        assert!(inbox[0].video_id.is_none());
    }

    #[tokio::test]
    async fn follow_twice_fails_without_second_notification() {
        let (service, db, _temp_dir) = setup().await;
        let sarah = seed_user(&db, "sarah_creates").await;
        let mike = seed_user(&db, "mike_watches").await;

        service.follow(&mike, &sarah.id).await.unwrap();
        let error = service.follow(&mike, &sarah.id).await.unwrap_err();
        assert!(matches!(error, AppError::AlreadyFollowing));

        assert_eq!(db.count_unread_notifications(&sarah.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn self_follow_is_rejected_first() {
        let (service, db, _temp_dir) = setup().await;
        let sarah = seed_user(&db, "sarah_creates").await;

        let error = service.follow(&sarah, &sarah.id).await.unwrap_err();
        assert!(matches!(error, AppError::SelfFollowForbidden));
        assert!(!db.is_following(&sarah.id, &sarah.id).await.unwrap());
    }

    #[tokio::test]
    async fn follow_unknown_user_is_not_found() {
        let (service, db, _temp_dir) = setup().await;
        let sarah = seed_user(&db, "sarah_creates").await;

        let error = service.follow(&sarah, "missing").await.unwrap_err();
        assert!(matches!(error, AppError::NotFound));
    }

    #[tokio::test]
    async fn unfollow_lifecycle() {
        let (service, db, _temp_dir) = setup().await;
        let sarah = seed_user(&db, "sarah_creates").await;
        let mike = seed_user(&db, "mike_watches").await;

        let error = service.unfollow(&mike.id, &sarah.id).await.unwrap_err();
        assert!(matches!(error, AppError::NotFollowing));

        service.follow(&mike, &sarah.id).await.unwrap();
        service.unfollow(&mike.id, &sarah.id).await.unwrap();
        assert!(!db.is_following(&mike.id, &sarah.id).await.unwrap());

        // unfollow leaves the original notification alone
        assert_eq!(db.get_notifications(&sarah.id, 10).await.unwrap().len(), 1);
    }
}
