//! Feed service
//!
//! Ranks the video catalogue for a viewer and records views.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use super::{Actor, VideoView};
use crate::data::{Database, EntityId, Video, WatchEvent};
use crate::error::AppError;

/// Catalogue inserted on first start when no video exists
const SAMPLE_VIDEOS: &[(&str, &str, &str)] = &[
    (
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
        "Big Buck Bunny",
        "Blender Foundation",
    ),
    (
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
        "Elephants Dream",
        "Blender Foundation",
    ),
    (
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        "For Bigger Blazes",
        "Google",
    ),
    (
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
        "For Bigger Escapes",
        "Google",
    ),
    (
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
        "For Bigger Fun",
        "Google",
    ),
];

/// Order videos for a viewer
///
/// Unwatched videos come first; within each group higher
/// `engagement_score` comes first. The sort is stable, so equal keys
/// keep the order of `videos`.
pub fn rank_feed(
    videos: Vec<Video>,
    watched: &HashSet<String>,
    liked: &HashSet<String>,
) -> Vec<VideoView> {
    let mut ranked: Vec<VideoView> = videos
        .into_iter()
        .map(|video| {
            let viewer_has_liked = liked.contains(&video.id);
            VideoView {
                video,
                viewer_has_liked,
            }
        })
        .collect();

    ranked.sort_by_key(|view| {
        (
            watched.contains(&view.video.id),
            Reverse(view.video.engagement_score()),
        )
    });

    ranked
}

/// Feed service
pub struct FeedService {
    db: Arc<Database>,
}

impl FeedService {
    /// Create new feed service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Ranked feed of every video for `viewer_id`
    ///
    /// Full scan on every call; an empty catalogue yields an empty feed.
    pub async fn feed(&self, viewer_id: &str) -> Result<Vec<VideoView>, AppError> {
        let watched = self.db.get_watched_video_ids(viewer_id).await?;
        let videos = self.db.get_all_videos().await?;

        let video_ids: Vec<String> = videos.iter().map(|video| video.id.clone()).collect();
        let liked = self
            .db
            .get_liked_video_ids_batch(viewer_id, &video_ids)
            .await?;

        let ranked = rank_feed(videos, &watched, &liked);

        tracing::debug!(
            viewer_id = %viewer_id,
            videos = ranked.len(),
            watched = watched.len(),
            "Feed ranked"
        );

        Ok(ranked)
    }

    /// Record that `viewer_id` watched a video
    ///
    /// Appends a watch event, then bumps the view counter. The two
    /// writes are independent; a failed counter update leaves the event.
    pub async fn record_view(
        &self,
        viewer_id: &str,
        video_id: &str,
        watch_duration: f64,
    ) -> Result<(), AppError> {
        if !watch_duration.is_finite() || watch_duration < 0.0 {
            return Err(AppError::Validation(
                "watch_duration must be a non-negative number".to_string(),
            ));
        }

        self.db
            .get_video(video_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let event = WatchEvent {
            id: EntityId::new().0,
            user_id: viewer_id.to_string(),
            video_id: video_id.to_string(),
            watch_duration,
            created_at: Utc::now(),
        };
        self.db.insert_watch_event(&event).await?;

        if !self.db.increment_video_views(video_id).await? {
            tracing::warn!(video_id = %video_id, "Video vanished before view counter update");
        }

        crate::metrics::VIEWS_RECORDED_TOTAL.inc();

        Ok(())
    }

    /// Publish a video owned by `owner`
    pub async fn publish(
        &self,
        owner: &Actor,
        video_url: String,
        title: String,
    ) -> Result<Video, AppError> {
        let video_url = video_url.trim().to_string();
        let title = title.trim().to_string();
        if video_url.is_empty() {
            return Err(AppError::Validation("video_url is required".to_string()));
        }
        if title.is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        let video = Video {
            id: EntityId::new().0,
            video_url,
            title,
            author: owner.name.clone(),
            owner_id: Some(owner.id.clone()),
            likes_count: 0,
            comments_count: 0,
            views: 0,
            created_at: Utc::now(),
        };
        self.db.insert_video(&video).await?;

        tracing::info!(video_id = %video.id, owner_id = %owner.id, "Video published");

        Ok(video)
    }

    /// Insert the sample catalogue if no video exists yet
    ///
    /// # Returns
    /// Number of videos inserted
    pub async fn seed_sample_videos(&self) -> Result<usize, AppError> {
        if self.db.count_videos().await? > 0 {
            return Ok(0);
        }

        for (video_url, title, author) in SAMPLE_VIDEOS {
            let video = Video {
                id: EntityId::new().0,
                video_url: video_url.to_string(),
                title: title.to_string(),
                author: author.to_string(),
                owner_id: None,
                likes_count: 0,
                comments_count: 0,
                views: 0,
                created_at: Utc::now(),
            };
            self.db.insert_video(&video).await?;
        }

        tracing::info!(count = SAMPLE_VIDEOS.len(), "Sample videos initialized");

        Ok(SAMPLE_VIDEOS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, likes: i64, comments: i64, views: i64) -> Video {
        Video {
            id: id.to_string(),
            video_url: format!("https://videos.example.com/{}.mp4", id),
            title: id.to_string(),
            author: "tester".to_string(),
            owner_id: None,
            likes_count: likes,
            comments_count: comments,
            views,
            created_at: Utc::now(),
        }
    }

    fn ids(ranked: &[VideoView]) -> Vec<&str> {
        ranked.iter().map(|view| view.video.id.as_str()).collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn empty_catalogue_yields_empty_feed() {
        assert!(rank_feed(Vec::new(), &HashSet::new(), &HashSet::new()).is_empty());
    }

    #[test]
    fn higher_engagement_first() {
        // scores: a = 2, b = 3, c = 1
        let videos = vec![video("a", 1, 0, 0), video("b", 0, 1, 0), video("c", 0, 0, 1)];

        let ranked = rank_feed(videos, &HashSet::new(), &HashSet::new());
        assert_eq!(ids(&ranked), ["b", "a", "c"]);
    }

    #[test]
    fn unwatched_before_watched_regardless_of_score() {
        let videos = vec![video("hot", 100, 100, 100), video("cold", 0, 0, 0)];

        let ranked = rank_feed(videos, &set(&["hot"]), &HashSet::new());
        assert_eq!(ids(&ranked), ["cold", "hot"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let videos = vec![
            video("first", 0, 0, 0),
            video("second", 0, 0, 0),
            video("third", 0, 0, 0),
        ];

        let ranked = rank_feed(videos, &HashSet::new(), &HashSet::new());
        assert_eq!(ids(&ranked), ["first", "second", "third"]);

        // equal score 6 via different mixes
        let videos = vec![video("likes", 3, 0, 0), video("comments", 0, 2, 0), video("views", 0, 0, 6)];
        let ranked = rank_feed(videos, &HashSet::new(), &HashSet::new());
        assert_eq!(ids(&ranked), ["likes", "comments", "views"]);
    }

    #[test]
    fn order_is_non_decreasing_in_watched_then_negative_score() {
        let videos = vec![
            video("a", 5, 1, 3),
            video("b", 0, 0, 9),
            video("c", 2, 2, 2),
            video("d", 1, 0, 0),
            video("e", 0, 4, 1),
            video("f", 7, 0, 0),
        ];
        let watched = set(&["a", "d", "f"]);

        let ranked = rank_feed(videos, &watched, &HashSet::new());
        let keys: Vec<(bool, i64)> = ranked
            .iter()
            .map(|view| {
                (
                    watched.contains(&view.video.id),
                    -view.video.engagement_score(),
                )
            })
            .collect();

        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(ids(&ranked), ["e", "c", "b", "f", "a", "d"]);
    }

    #[test]
    fn liked_flag_is_annotated() {
        let videos = vec![video("a", 0, 0, 0), video("b", 0, 0, 0)];

        let ranked = rank_feed(videos, &HashSet::new(), &set(&["b"]));
        assert!(!ranked[0].viewer_has_liked);
        assert!(ranked[1].viewer_has_liked);
    }

    mod with_database {
        use super::*;
        use tempfile::TempDir;

        async fn create_service() -> (FeedService, Arc<Database>, TempDir) {
            let temp_dir = TempDir::new().unwrap();
            let db_path = temp_dir.path().join("service-feed.db");
            let db = Arc::new(Database::connect(&db_path).await.unwrap());
            (FeedService::new(db.clone()), db, temp_dir)
        }

        #[tokio::test]
        async fn seeding_is_idempotent() {
            let (service, db, _temp_dir) = create_service().await;

            assert_eq!(service.seed_sample_videos().await.unwrap(), 5);
            assert_eq!(service.seed_sample_videos().await.unwrap(), 0);
            assert_eq!(db.count_videos().await.unwrap(), 5);

            let titles: Vec<String> = db
                .get_all_videos()
                .await
                .unwrap()
                .into_iter()
                .map(|video| video.title)
                .collect();
            assert_eq!(titles[0], "Big Buck Bunny");
            assert_eq!(titles[4], "For Bigger Fun");
        }

        #[tokio::test]
        async fn record_view_appends_event_and_bumps_counter() {
            let (service, db, _temp_dir) = create_service().await;
            service.seed_sample_videos().await.unwrap();
            let video = db.get_all_videos().await.unwrap().remove(0);

            service.record_view("viewer", &video.id, 12.5).await.unwrap();
            service.record_view("viewer", &video.id, 0.0).await.unwrap();

            assert_eq!(db.count_watch_events("viewer", &video.id).await.unwrap(), 2);
            assert_eq!(db.get_video(&video.id).await.unwrap().unwrap().views, 2);
        }

        #[tokio::test]
        async fn record_view_rejects_bad_input() {
            let (service, db, _temp_dir) = create_service().await;
            service.seed_sample_videos().await.unwrap();
            let video = db.get_all_videos().await.unwrap().remove(0);

            for duration in [-1.0, f64::NAN, f64::INFINITY] {
                let error = service
                    .record_view("viewer", &video.id, duration)
                    .await
                    .unwrap_err();
                assert!(matches!(error, AppError::Validation(_)));
            }

            let error = service
                .record_view("viewer", "missing-video", 3.0)
                .await
                .unwrap_err();
            assert!(matches!(error, AppError::NotFound));
            assert_eq!(db.count_watch_events("viewer", "missing-video").await.unwrap(), 0);
        }

        #[tokio::test]
        async fn watched_videos_sink_to_the_bottom() {
            let (service, db, _temp_dir) = create_service().await;
            service.seed_sample_videos().await.unwrap();
            let videos = db.get_all_videos().await.unwrap();

            // popular with everyone else
            for _ in 0..10 {
                db.increment_video_views(&videos[0].id).await.unwrap();
            }

            let before = service.feed("viewer").await.unwrap();
            assert_eq!(before[0].video.id, videos[0].id);

            service.record_view("viewer", &videos[0].id, 5.0).await.unwrap();

            let after = service.feed("viewer").await.unwrap();
            assert_eq!(after.len(), 5);
            assert_eq!(after[4].video.id, videos[0].id);
            assert_eq!(after[0].video.id, videos[1].id);
        }

        #[tokio::test]
        async fn publish_sets_owner_and_validates() {
            let (service, _db, _temp_dir) = create_service().await;
            let owner = Actor {
                id: "owner-1".to_string(),
                name: "sarah_creates".to_string(),
            };

            let video = service
                .publish(&owner, " https://v.example.com/a.mp4 ".to_string(), "Sunset".to_string())
                .await
                .unwrap();
            assert_eq!(video.owner_id.as_deref(), Some("owner-1"));
            assert_eq!(video.author, "sarah_creates");
            assert_eq!(video.video_url, "https://v.example.com/a.mp4");

            let error = service
                .publish(&owner, "https://v.example.com/b.mp4".to_string(), "  ".to_string())
                .await
                .unwrap_err();
            assert!(matches!(error, AppError::Validation(_)));
        }
    }
}
