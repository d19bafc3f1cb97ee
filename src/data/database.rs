//! SQLite database operations
//!
//! All database access goes through this module.
//!
//! Every method issues a single statement. Multi-step operations
//! (write a like, then bump the counter) are composed by the service
//! layer out of these calls, without a surrounding transaction.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::Utc;
use sqlx::{Pool, QueryBuilder, Sqlite, SqlitePool};

use super::models::*;
use crate::error::AppError;

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}

/// Build a `LIKE` pattern matching `keyword` anywhere, with wildcards escaped.
fn contains_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl Database {
    // =========================================================================
    // Connection
    // =========================================================================

    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        let connection_string = format!("sqlite:{}?mode=rwc", path.display());
        let pool = SqlitePool::connect(&connection_string).await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!("Database connected and migrated successfully");

        Ok(Self { pool })
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a new user
    ///
    /// # Errors
    /// `EmailTaken` if the email is already registered
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, username, bio, avatar, created_at,
                username_folded, email_folded
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.username)
        .bind(&user.bio)
        .bind(&user.avatar)
        .bind(user.created_at)
        .bind(user.username.to_lowercase())
        .bind(user.email.to_lowercase())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(AppError::EmailTaken),
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Resolve usernames for a set of user IDs
    ///
    /// Missing users are simply absent from the returned map.
    pub async fn get_usernames_batch(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, String>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT id, username FROM users WHERE id IN (");
        {
            let mut separated = query_builder.separated(", ");
            for user_id in user_ids {
                separated.push_bind(user_id);
            }
        }
        query_builder.push(")");

        let rows = query_builder
            .build_query_as::<(String, String)>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Users whose username or email contains `keyword`, ignoring case
    ///
    /// Matches against the lowercased columns written on insert, so case
    /// folding covers all of Unicode rather than ASCII only.
    /// Results come back in insertion order.
    pub async fn search_users(&self, keyword: &str, limit: usize) -> Result<Vec<User>, AppError> {
        let pattern = contains_pattern(&keyword.to_lowercase());
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE username_folded LIKE ?1 ESCAPE '\' OR email_folded LIKE ?1 ESCAPE '\'
            ORDER BY rowid ASC
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    // =========================================================================
    // Videos
    // =========================================================================

    pub async fn insert_video(&self, video: &Video) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO videos (
                id, video_url, title, author, owner_id,
                likes_count, comments_count, views, created_at,
                title_folded, author_folded
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&video.id)
        .bind(&video.video_url)
        .bind(&video.title)
        .bind(&video.author)
        .bind(&video.owner_id)
        .bind(video.likes_count)
        .bind(video.comments_count)
        .bind(video.views)
        .bind(video.created_at)
        .bind(video.title.to_lowercase())
        .bind(video.author.to_lowercase())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_video(&self, id: &str) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    /// All videos in insertion order
    pub async fn get_all_videos(&self) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY rowid ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    pub async fn count_videos(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Videos whose title or author contains `keyword`, ignoring case
    pub async fn search_videos(&self, keyword: &str, limit: usize) -> Result<Vec<Video>, AppError> {
        let pattern = contains_pattern(&keyword.to_lowercase());
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT * FROM videos
            WHERE title_folded LIKE ?1 ESCAPE '\' OR author_folded LIKE ?1 ESCAPE '\'
            ORDER BY rowid ASC
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    /// Increment view counter
    ///
    /// # Returns
    /// false if the video does not exist
    pub async fn increment_video_views(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE videos SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn increment_video_likes(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE videos SET likes_count = likes_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Decrement like counter, never below zero
    pub async fn decrement_video_likes(&self, id: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE videos SET likes_count = MAX(likes_count - 1, 0) WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn increment_video_comments(&self, id: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE videos SET comments_count = comments_count + 1 WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Watch history
    // =========================================================================

    pub async fn insert_watch_event(&self, event: &WatchEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO watch_history (id, user_id, video_id, watch_duration, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.user_id)
        .bind(&event.video_id)
        .bind(event.watch_duration)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Distinct video IDs the user has watched at least once
    pub async fn get_watched_video_ids(&self, user_id: &str) -> Result<HashSet<String>, AppError> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT video_id FROM watch_history WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    pub async fn count_watch_events(&self, user_id: &str, video_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM watch_history WHERE user_id = ? AND video_id = ?",
        )
        .bind(user_id)
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // =========================================================================
    // Video likes
    // =========================================================================

    /// Insert a (user, video) like
    ///
    /// # Returns
    /// false if the pair already exists
    pub async fn insert_like(&self, user_id: &str, video_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO likes (id, user_id, video_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(EntityId::new().0)
        .bind(user_id)
        .bind(video_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(error) if is_unique_violation(&error) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    /// Delete a (user, video) like
    ///
    /// # Returns
    /// false if there was nothing to delete
    pub async fn delete_like(&self, user_id: &str, video_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = ? AND video_id = ?")
            .bind(user_id)
            .bind(video_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn is_liked(&self, user_id: &str, video_id: &str) -> Result<bool, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE user_id = ? AND video_id = ?")
                .bind(user_id)
                .bind(video_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Video IDs among `video_ids` the user has liked
    pub async fn get_liked_video_ids_batch(
        &self,
        user_id: &str,
        video_ids: &[String],
    ) -> Result<HashSet<String>, AppError> {
        if video_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT video_id FROM likes WHERE user_id = ");
        query_builder.push_bind(user_id);
        query_builder.push(" AND video_id IN (");
        {
            let mut separated = query_builder.separated(", ");
            for video_id in video_ids {
                separated.push_bind(video_id);
            }
        }
        query_builder.push(")");

        let ids = query_builder
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().collect())
    }

    pub async fn count_video_likes(&self, video_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE video_id = ?")
            .bind(video_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    pub async fn insert_comment(&self, comment: &Comment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, video_id, user_id, text, image, likes_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.video_id)
        .bind(&comment.user_id)
        .bind(&comment.text)
        .bind(&comment.image)
        .bind(comment.likes_count)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_comment(&self, id: &str) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    /// Comments on a video, newest first
    pub async fn get_comments_by_video(
        &self,
        video_id: &str,
        limit: usize,
    ) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE video_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(video_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    // =========================================================================
    // Comment likes
    // =========================================================================

    /// Insert a (user, comment) like
    ///
    /// # Returns
    /// false if the pair already exists
    pub async fn insert_comment_like(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO comment_likes (id, user_id, comment_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(EntityId::new().0)
        .bind(user_id)
        .bind(comment_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(error) if is_unique_violation(&error) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete_comment_like(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM comment_likes WHERE user_id = ? AND comment_id = ?")
                .bind(user_id)
                .bind(comment_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Comment IDs among `comment_ids` the user has liked
    pub async fn get_liked_comment_ids_batch(
        &self,
        user_id: &str,
        comment_ids: &[String],
    ) -> Result<HashSet<String>, AppError> {
        if comment_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT comment_id FROM comment_likes WHERE user_id = ");
        query_builder.push_bind(user_id);
        query_builder.push(" AND comment_id IN (");
        {
            let mut separated = query_builder.separated(", ");
            for comment_id in comment_ids {
                separated.push_bind(comment_id);
            }
        }
        query_builder.push(")");

        let ids = query_builder
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().collect())
    }

    pub async fn increment_comment_likes(&self, id: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE comments SET likes_count = likes_count + 1 WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Decrement comment like counter, never below zero
    pub async fn decrement_comment_likes(&self, id: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE comments SET likes_count = MAX(likes_count - 1, 0) WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Follows
    // =========================================================================

    /// Insert a follow edge
    ///
    /// # Returns
    /// false if the edge already exists
    pub async fn insert_follow(&self, follow: &Follow) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO follows (id, follower_id, following_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&follow.id)
        .bind(&follow.follower_id)
        .bind(&follow.following_id)
        .bind(follow.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(error) if is_unique_violation(&error) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete_follow(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND following_id = ?")
            .bind(follower_id)
            .bind(following_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND following_id = ?",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub async fn insert_notification(&self, notification: &Notification) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, kind, actor_id, actor_name, content, video_id, read, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&notification.id)
        .bind(&notification.recipient_id)
        .bind(&notification.kind)
        .bind(&notification.actor_id)
        .bind(&notification.actor_name)
        .bind(&notification.content)
        .bind(&notification.video_id)
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Notifications addressed to `recipient_id`, newest first
    pub async fn get_notifications(
        &self,
        recipient_id: &str,
        limit: usize,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(recipient_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Notifications that reference a video, regardless of recipient
    pub async fn get_notifications_for_video(
        &self,
        video_id: &str,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE video_id = ? ORDER BY rowid ASC",
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark one of the recipient's notifications as read
    ///
    /// # Returns
    /// false if no such notification belongs to the recipient
    pub async fn mark_notification_read(
        &self,
        id: &str,
        recipient_id: &str,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE notifications SET read = 1 WHERE id = ? AND recipient_id = ?")
                .bind(id)
                .bind(recipient_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_unread_notifications(&self, recipient_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = ? AND read = 0",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // =========================================================================
    // Direct messages
    // =========================================================================

    pub async fn insert_message(&self, message: &Message) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, text, image, read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.text)
        .bind(&message.image)
        .bind(message.read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Messages the user sent or received, newest first
    pub async fn get_messages_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE sender_id = ?1 OR receiver_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    // =========================================================================
    // Search history / hot searches
    // =========================================================================

    pub async fn insert_search_history(&self, entry: &SearchHistoryEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO search_history (id, user_id, keyword, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.keyword)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete all but the `keep` most recent history entries of a user
    ///
    /// # Returns
    /// Number of evicted entries
    pub async fn trim_search_history(&self, user_id: &str, keep: usize) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM search_history
            WHERE user_id = ?1 AND id NOT IN (
                SELECT id FROM search_history
                WHERE user_id = ?1
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?2
            )
            "#,
        )
        .bind(user_id)
        .bind(keep as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Most recent history entries of a user, newest first
    pub async fn get_search_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SearchHistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, SearchHistoryEntry>(
            "SELECT * FROM search_history WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn count_search_history(&self, user_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_history WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Delete one history entry owned by the user
    pub async fn delete_search_history_entry(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM search_history WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn clear_search_history(&self, user_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM search_history WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Create the tally at 1 or increment it
    pub async fn upsert_hot_search(&self, keyword: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO hot_searches (keyword, count, updated_at) VALUES (?, 1, ?)
            ON CONFLICT(keyword) DO UPDATE SET
                count = count + 1,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(keyword)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_hot_search(&self, keyword: &str) -> Result<Option<HotSearch>, AppError> {
        let hot = sqlx::query_as::<_, HotSearch>(
            "SELECT keyword, count FROM hot_searches WHERE keyword = ?",
        )
        .bind(keyword)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hot)
    }

    /// Most searched keywords, highest count first
    pub async fn get_hot_searches(&self, limit: usize) -> Result<Vec<HotSearch>, AppError> {
        let hot = sqlx::query_as::<_, HotSearch>(
            "SELECT keyword, count FROM hot_searches ORDER BY count DESC, keyword ASC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(hot)
    }
}
