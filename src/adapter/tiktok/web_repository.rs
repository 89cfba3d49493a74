//! # TikTok Web Repository
//!
//! TikTokRepository のWeb API実装

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::client::HttpClient;
use super::endpoints::{self, Endpoints};
use super::response;
use crate::domain::entities::{Comment, Hashtag, Page, User, Video, VideoRef};
use crate::domain::repositories::tiktok_repository::TikTokRepository;

/// TikTok Web API を呼び出すリポジトリ
pub struct TikTokWebRepository<H: HttpClient> {
    client: Arc<H>,
    endpoints: Endpoints,
}

impl<H: HttpClient> TikTokWebRepository<H> {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `client` - HTTPクライアント
    /// * `endpoints` - セッショントークンを含むURLビルダー
    pub fn new(client: Arc<H>, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// GETリクエストを送り、検証済みのJSONを返す
    async fn fetch(&self, endpoint: &'static str, url: Url) -> Result<Value> {
        debug!("Requesting {}", endpoint);

        let client = self.client.clone();
        let headers = self.endpoints.headers();
        let response = tokio::task::spawn_blocking(move || client.get(&url, &headers))
            .await
            .map_err(|e| anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(response::into_json(endpoint, response)?)
    }
}

fn require_sec_uid(user: &User) -> Result<String> {
    user.sec_uid()
        .ok_or_else(|| anyhow!("User {} has no secUid", user.unique_id()))
}

#[async_trait]
impl<H: HttpClient> TikTokRepository for TikTokWebRepository<H> {
    async fn user_info(&self, username: &str) -> Result<User> {
        let value = self
            .fetch(endpoints::USER_DETAIL, self.endpoints.user_detail(username))
            .await?;
        let user = response::user_info(endpoints::USER_DETAIL, &value)?;

        info!(
            "Loaded user {} ({} videos)",
            user.unique_id(),
            user.video_count().unwrap_or(0)
        );
        Ok(user)
    }

    async fn user_videos_page(&self, user: &User, cursor: i64) -> Result<Page<Video>> {
        let sec_uid = require_sec_uid(user)?;
        let value = self
            .fetch(endpoints::USER_POSTS, self.endpoints.user_posts(&sec_uid, cursor))
            .await?;
        Ok(response::video_page(&value))
    }

    async fn user_followers_page(&self, user: &User, cursor: i64) -> Result<Page<User>> {
        let sec_uid = require_sec_uid(user)?;
        let value = self
            .fetch(
                endpoints::USER_FOLLOWERS,
                self.endpoints.user_followers(&sec_uid, cursor),
            )
            .await?;
        Ok(response::follower_page(&value))
    }

    async fn trending_page(&self, cursor: i64) -> Result<Page<Video>> {
        let value = self
            .fetch(endpoints::RECOMMEND, self.endpoints.recommend())
            .await?;
        Ok(response::recommend_page(&value, cursor))
    }

    async fn hashtag_info(&self, name: &str) -> Result<Hashtag> {
        let value = self
            .fetch(
                endpoints::CHALLENGE_DETAIL,
                self.endpoints.challenge_detail(name),
            )
            .await?;
        let hashtag = response::hashtag_info(endpoints::CHALLENGE_DETAIL, &value)?;

        info!("Loaded hashtag #{} (id {})", hashtag.title(), hashtag.id());
        Ok(hashtag)
    }

    async fn hashtag_videos_page(&self, hashtag: &Hashtag, cursor: i64) -> Result<Page<Video>> {
        let challenge_id = hashtag.id();
        if challenge_id.is_empty() {
            return Err(anyhow!("Hashtag #{} has no id", hashtag.title()));
        }

        let value = self
            .fetch(
                endpoints::CHALLENGE_ITEMS,
                self.endpoints.challenge_items(&challenge_id, cursor),
            )
            .await?;
        Ok(response::video_page(&value))
    }

    async fn video_info(&self, video: &VideoRef) -> Result<Video> {
        let video_id = video
            .video_id()
            .with_context(|| format!("Cannot determine a video id from {}", video))?;

        let value = self
            .fetch(endpoints::ITEM_DETAIL, self.endpoints.item_detail(&video_id))
            .await?;
        Ok(response::video_info(endpoints::ITEM_DETAIL, &value)?)
    }

    async fn video_comments_page(&self, video_id: &str, cursor: i64) -> Result<Page<Comment>> {
        let value = self
            .fetch(endpoints::COMMENTS, self.endpoints.comments(video_id, cursor))
            .await?;
        Ok(response::comment_page(&value))
    }
}
