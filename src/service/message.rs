//! Direct message service

use std::sync::Arc;

use chrono::Utc;

use super::{Actor, MessageView, UNKNOWN_USERNAME};
use crate::data::{Database, EntityId, Message};
use crate::error::AppError;

/// Messages returned by one listing
const CONVERSATION_LIMIT: usize = 1000;

/// Direct message service
pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    /// Create new message service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Send a message
    ///
    /// Needs either text or an image.
    ///
    /// # Errors
    /// `NotFound` for an unknown receiver
    pub async fn send(
        &self,
        sender: &Actor,
        receiver_id: &str,
        text: String,
        image: Option<String>,
    ) -> Result<MessageView, AppError> {
        let image = image.filter(|image| !image.is_empty());
        if text.trim().is_empty() && image.is_none() {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        }

        self.db
            .get_user(receiver_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let message = Message {
            id: EntityId::new().0,
            sender_id: sender.id.clone(),
            receiver_id: receiver_id.to_string(),
            text,
            image,
            read: false,
            created_at: Utc::now(),
        };
        self.db.insert_message(&message).await?;

        crate::metrics::MESSAGES_SENT_TOTAL.inc();
        tracing::debug!(message_id = %message.id, receiver_id = %receiver_id, "Message sent");

        Ok(MessageView {
            message,
            sender_name: sender.name.clone(),
        })
    }

    /// Newest-first messages the user sent or received
    pub async fn conversations(&self, user_id: &str) -> Result<Vec<MessageView>, AppError> {
        let messages = self
            .db
            .get_messages_for_user(user_id, CONVERSATION_LIMIT)
            .await?;

        let mut sender_ids: Vec<String> = messages.iter().map(|m| m.sender_id.clone()).collect();
        sender_ids.sort();
        sender_ids.dedup();
        let usernames = self.db.get_usernames_batch(&sender_ids).await?;

        Ok(messages
            .into_iter()
            .map(|message| MessageView {
                sender_name: usernames
                    .get(&message.sender_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
                message,
            })
            .collect())
    }
}
