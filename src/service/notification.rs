//! Notification service
//!
//! Creates notifications for other users' actions and serves a
//! recipient's inbox.

use std::sync::Arc;

use chrono::Utc;

use super::Actor;
use crate::data::{Database, EntityId, Notification, NotificationKind};
use crate::error::AppError;

/// Maximum notifications returned by one listing
const INBOX_LIMIT: usize = 1000;

/// Notification service
pub struct NotificationService {
    db: Arc<Database>,
}

impl NotificationService {
    /// Create new notification service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Record a notification for `recipient_id`
    ///
    /// A `None` recipient still persists the record; nobody will ever
    /// list it. Actor name is copied so later renames don't rewrite history.
    pub async fn notify(
        &self,
        recipient_id: Option<&str>,
        kind: NotificationKind,
        actor: &Actor,
        content: &str,
        video_id: Option<&str>,
    ) -> Result<Notification, AppError> {
        let notification = Notification {
            id: EntityId::new().0,
            recipient_id: recipient_id.map(str::to_string),
            kind: kind.as_str().to_string(),
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            content: content.to_string(),
            video_id: video_id.map(str::to_string),
            read: false,
            created_at: Utc::now(),
        };
        self.db.insert_notification(&notification).await?;

        let routed = if recipient_id.is_some() { "yes" } else { "no" };
        crate::metrics::NOTIFICATIONS_CREATED_TOTAL
            .with_label_values(&[kind.as_str(), routed])
            .inc();

        match recipient_id {
            Some(recipient_id) => tracing::debug!(
                notification_id = %notification.id,
                recipient_id = %recipient_id,
                kind = kind.as_str(),
                "Notification created"
            ),
            None => tracing::debug!(
                notification_id = %notification.id,
                kind = kind.as_str(),
                "Notification created without recipient"
            ),
        }

        Ok(notification)
    }

    /// Newest-first notifications of a recipient
    pub async fn list(&self, recipient_id: &str) -> Result<Vec<Notification>, AppError> {
        self.db.get_notifications(recipient_id, INBOX_LIMIT).await
    }

    /// Mark one of the recipient's notifications as read
    ///
    /// # Errors
    /// `NotFound` if the notification doesn't exist or belongs to someone else
    pub async fn mark_read(&self, notification_id: &str, recipient_id: &str) -> Result<(), AppError> {
        if !self
            .db
            .mark_notification_read(notification_id, recipient_id)
            .await?
        {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn unread_count(&self, recipient_id: &str) -> Result<i64, AppError> {
        self.db.count_unread_notifications(recipient_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_service() -> (NotificationService, Arc<Database>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("service-notification.db");
        let db = Arc::new(Database::connect(&db_path).await.unwrap());
        (NotificationService::new(db.clone()), db, temp_dir)
    }

    fn actor() -> Actor {
        Actor {
            id: "actor-1".to_string(),
            name: "mike_watches".to_string(),
        }
    }

    #[tokio::test]
    async fn notify_then_list_and_mark_read() {
        let (service, _db, _temp_dir) = create_service().await;

        let first = service
            .notify(Some("owner"), NotificationKind::Follow, &actor(), "started following you", None)
            .await
            .unwrap();
        let second = service
            .notify(
                Some("owner"),
                NotificationKind::Comment,
                &actor(),
                "commented on your video",
                Some("video-1"),
            )
            .await
            .unwrap();

        let inbox = service.list("owner").await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].id, second.id);
        assert_eq!(inbox[0].actor_name, "mike_watches");
        assert_eq!(inbox[0].video_id.as_deref(), Some("video-1"));
        assert_eq!(service.unread_count("owner").await.unwrap(), 2);

        service.mark_read(&first.id, "owner").await.unwrap();
        assert_eq!(service.unread_count("owner").await.unwrap(), 1);

        // idempotent
        service.mark_read(&first.id, "owner").await.unwrap();
        assert_eq!(service.unread_count("owner").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mark_read_is_scoped_to_recipient() {
        let (service, _db, _temp_dir) = create_service().await;

        let notification = service
            .notify(Some("owner"), NotificationKind::Follow, &actor(), "started following you", None)
            .await
            .unwrap();

        let error = service.mark_read(&notification.id, "intruder").await.unwrap_err();
        assert!(matches!(error, AppError::NotFound));

        let error = service.mark_read("missing", "owner").await.unwrap_err();
        assert!(matches!(error, AppError::NotFound));

        assert_eq!(service.unread_count("owner").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn notification_without_recipient_is_stored_but_unlisted() {
        let (service, db, _temp_dir) = create_service().await;

        let dead = service
            .notify(None, NotificationKind::Comment, &actor(), "commented on your video", Some("v"))
            .await
            .unwrap();
        assert!(dead.recipient_id.is_none());

        let stored = db.get_notifications_for_video("v").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(service.list("actor-1").await.unwrap().is_empty());
    }
}
