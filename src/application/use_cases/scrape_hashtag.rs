//! # Scrape Hashtag Use Case
//!
//! ハッシュタグの動画を収集するユースケース

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use super::pagination::{collect_pages, ProgressFn};
use crate::domain::entities::ReportBody;
use crate::domain::repositories::tiktok_repository::TikTokRepository;

/// ハッシュタグ収集ユースケース
pub struct ScrapeHashtagUseCase<R: TikTokRepository> {
    repository: Arc<R>,
}

impl<R: TikTokRepository> ScrapeHashtagUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// ハッシュタグを解決し、その動画を `limit` 件まで収集する
    ///
    /// # Arguments
    ///
    /// * `name` - `#` を除いたハッシュタグ名
    /// * `limit` - 最大件数
    /// * `progress` - 進捗コールバック
    pub async fn execute(
        &self,
        name: &str,
        limit: usize,
        progress: ProgressFn<'_>,
    ) -> Result<ReportBody> {
        let repository: &R = &self.repository;

        let hashtag = repository
            .hashtag_info(name)
            .await
            .with_context(|| format!("Failed to load hashtag #{}", name))?;
        info!("Resolved hashtag #{} to challenge id {}", name, hashtag.id());

        let hashtag_ref = &hashtag;
        let videos = collect_pages(
            limit,
            move |cursor| repository.hashtag_videos_page(hashtag_ref, cursor),
            progress,
        )
        .await
        .with_context(|| format!("Failed to extract videos for #{}", name))?;

        Ok(ReportBody::hashtag(name, videos))
    }
}
