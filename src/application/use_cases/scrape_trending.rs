//! # Scrape Trending Use Case
//!
//! トレンド動画を収集するユースケース

use std::sync::Arc;

use anyhow::{Context, Result};

use super::pagination::{collect_pages, ProgressFn};
use crate::domain::entities::ReportBody;
use crate::domain::repositories::tiktok_repository::TikTokRepository;

/// トレンド収集ユースケース
pub struct ScrapeTrendingUseCase<R: TikTokRepository> {
    repository: Arc<R>,
}

impl<R: TikTokRepository> ScrapeTrendingUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// トレンド動画を `limit` 件まで収集する
    pub async fn execute(&self, limit: usize, progress: ProgressFn<'_>) -> Result<ReportBody> {
        let repository: &R = &self.repository;
        let videos = collect_pages(limit, move |cursor| repository.trending_page(cursor), progress)
            .await
            .context("Failed to extract trending videos")?;

        Ok(ReportBody::trending(videos))
    }
}
