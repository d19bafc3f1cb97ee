//! Search service
//!
//! Keyword search over videos and users, per-user search history and
//! the global hot-search tally.

use std::sync::Arc;

use chrono::Utc;

use super::{SearchResults, VideoView};
use crate::data::{Database, EntityId, HotSearch, SearchCategory, SearchHistoryEntry};
use crate::error::AppError;

/// Per-kind result cap
const RESULT_LIMIT: usize = 20;
/// History entries kept per user
const HISTORY_LIMIT: usize = 10;
/// Hot searches returned
const HOT_LIMIT: usize = 10;

fn normalize_keyword(keyword: &str) -> Result<&str, AppError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }
    Ok(keyword)
}

/// Search service
pub struct SearchService {
    db: Arc<Database>,
}

impl SearchService {
    /// Create new search service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Case-insensitive substring search
    ///
    /// Videos match on title or author, users on username or email.
    /// Each list is capped at 20 and keeps insertion order.
    pub async fn search(
        &self,
        viewer_id: &str,
        keyword: &str,
        category: SearchCategory,
    ) -> Result<SearchResults, AppError> {
        let keyword = normalize_keyword(keyword)?;
        let mut results = SearchResults::default();

        if category.includes_videos() {
            let videos = self.db.search_videos(keyword, RESULT_LIMIT).await?;
            let video_ids: Vec<String> = videos.iter().map(|video| video.id.clone()).collect();
            let liked = self
                .db
                .get_liked_video_ids_batch(viewer_id, &video_ids)
                .await?;

            results.videos = videos
                .into_iter()
                .map(|video| VideoView {
                    viewer_has_liked: liked.contains(&video.id),
                    video,
                })
                .collect();
        }

        if category.includes_users() {
            results.users = self.db.search_users(keyword, RESULT_LIMIT).await?;
        }

        crate::metrics::SEARCHES_TOTAL
            .with_label_values(&[category.as_str()])
            .inc();
        tracing::debug!(
            keyword = %keyword,
            category = category.as_str(),
            total = results.total_count(),
            "Search executed"
        );

        Ok(results)
    }

    /// Remember a search for the user and count it globally
    ///
    /// History is trimmed to the newest 10 entries afterwards.
    pub async fn record_search(&self, user_id: &str, keyword: &str) -> Result<(), AppError> {
        let keyword = normalize_keyword(keyword)?;

        let entry = SearchHistoryEntry {
            id: EntityId::new().0,
            user_id: user_id.to_string(),
            keyword: keyword.to_string(),
            created_at: Utc::now(),
        };
        self.db.insert_search_history(&entry).await?;

        let evicted = self.db.trim_search_history(user_id, HISTORY_LIMIT).await?;
        if evicted > 0 {
            tracing::debug!(user_id = %user_id, evicted, "Search history trimmed");
        }

        self.db.upsert_hot_search(keyword).await?;

        Ok(())
    }

    /// Newest-first history of the user
    pub async fn history(&self, user_id: &str) -> Result<Vec<SearchHistoryEntry>, AppError> {
        self.db.get_search_history(user_id, HISTORY_LIMIT).await
    }

    /// Delete one of the user's history entries
    ///
    /// # Errors
    /// `NotFound` if the entry doesn't exist or belongs to someone else
    pub async fn delete_history_entry(&self, user_id: &str, entry_id: &str) -> Result<(), AppError> {
        if !self.db.delete_search_history_entry(entry_id, user_id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn clear_history(&self, user_id: &str) -> Result<u64, AppError> {
        self.db.clear_search_history(user_id).await
    }

    /// Most searched keywords
    pub async fn hot_searches(&self) -> Result<Vec<HotSearch>, AppError> {
        self.db.get_hot_searches(HOT_LIMIT).await
    }
}
