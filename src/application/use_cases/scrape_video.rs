//! # Scrape Video Use Case
//!
//! 動画の詳細と、必要に応じてコメントを収集するユースケース

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use super::pagination::{collect_pages, ProgressFn};
use crate::domain::entities::{ReportBody, VideoRef};
use crate::domain::repositories::tiktok_repository::TikTokRepository;

/// 動画収集ユースケース
pub struct ScrapeVideoUseCase<R: TikTokRepository> {
    repository: Arc<R>,
}

impl<R: TikTokRepository> ScrapeVideoUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// 動画の詳細を取得し、`comment_limit` が `Some` ならコメントも収集する
    ///
    /// # Errors
    ///
    /// 動画またはコメントの取得に失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        video: &VideoRef,
        comment_limit: Option<usize>,
        progress: ProgressFn<'_>,
    ) -> Result<ReportBody> {
        let repository: &R = &self.repository;

        let info = repository
            .video_info(video)
            .await
            .with_context(|| format!("Failed to load video {}", video))?;

        let comments = match comment_limit {
            Some(limit) => {
                let video_id = Some(info.id())
                    .filter(|id| !id.is_empty())
                    .or_else(|| video.video_id())
                    .ok_or_else(|| anyhow!("Video {} has no id to fetch comments for", video))?;
                let video_id = video_id.as_str();
                let comments = collect_pages(
                    limit,
                    move |cursor| repository.video_comments_page(video_id, cursor),
                    progress,
                )
                .await
                .with_context(|| format!("Failed to extract comments of video {}", video_id))?;
                Some(comments)
            }
            None => None,
        };

        Ok(ReportBody::video(info, comments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::pagination::no_progress;
    use crate::domain::entities::{Comment, Page, Video};
    use crate::domain::repositories::tiktok_repository::MockTikTokRepository;
    use serde_json::json;

    fn video_ref() -> VideoRef {
        VideoRef::Id("7301234567890123456".to_string())
    }

    #[tokio::test]
    async fn test_video_without_comments() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_video_info()
            .returning(|_| Ok(Video::new(json!({ "id": "7301234567890123456" }))));
        mock.expect_video_comments_page().never();

        let use_case = ScrapeVideoUseCase::new(Arc::new(mock));
        let body = use_case
            .execute(&video_ref(), None, &no_progress)
            .await
            .unwrap();

        assert!(matches!(
            body,
            ReportBody::Video {
                comments: None,
                total_comments: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_video_with_comments() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_video_info()
            .returning(|_| Ok(Video::new(json!({ "id": "7301234567890123456" }))));
        mock.expect_video_comments_page()
            .withf(|video_id, _| video_id == "7301234567890123456")
            .returning(|_, cursor| {
                let items = (0..20)
                    .map(|i| Comment::new(json!({ "cid": format!("{}", cursor + i) })))
                    .collect();
                Ok(Page::new(items, true, cursor + 20))
            });

        let use_case = ScrapeVideoUseCase::new(Arc::new(mock));
        let body = use_case
            .execute(&video_ref(), Some(30), &no_progress)
            .await
            .unwrap();

        assert_eq!(body.item_count(), 30);
    }

    #[tokio::test]
    async fn test_comments_fall_back_to_reference_id() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_video_info()
            .returning(|_| Ok(Video::new(json!({ "desc": "no id field" }))));
        mock.expect_video_comments_page()
            .withf(|video_id, _| video_id == "7301234567890123456")
            .returning(|_, _| Ok(Page::empty()));

        let use_case = ScrapeVideoUseCase::new(Arc::new(mock));
        let body = use_case
            .execute(&video_ref(), Some(30), &no_progress)
            .await
            .unwrap();

        assert!(matches!(
            body,
            ReportBody::Video {
                total_comments: Some(0),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_video_failure_propagates() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_video_info()
            .returning(|_| Err(anyhow::anyhow!("status 10204")));

        let use_case = ScrapeVideoUseCase::new(Arc::new(mock));
        let err = use_case
            .execute(&video_ref(), Some(30), &no_progress)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("7301234567890123456"));
    }
}
