//! # Scrape User Use Case
//!
//! ユーザープロフィールと投稿動画（またはフォロワー）を収集するユースケース

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use super::pagination::{collect_pages, ProgressFn};
use crate::domain::entities::ReportBody;
use crate::domain::repositories::tiktok_repository::TikTokRepository;

/// ユーザーについて何を集めるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    /// 投稿動画
    Videos,
    /// フォロワー（動画は収集しない）
    Followers,
}

/// ユーザー収集ユースケース
pub struct ScrapeUserUseCase<R: TikTokRepository> {
    repository: Arc<R>,
}

impl<R: TikTokRepository> ScrapeUserUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `repository` - TikTokリポジトリ
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// プロフィールを読み込み、動画またはフォロワーを `limit` 件まで収集する
    ///
    /// # Arguments
    ///
    /// * `username` - ユーザー名
    /// * `scope` - 動画かフォロワーか
    /// * `limit` - 最大件数
    /// * `progress` - 進捗コールバック
    ///
    /// # Errors
    ///
    /// プロフィールまたは一覧の取得に失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        username: &str,
        scope: UserScope,
        limit: usize,
        progress: ProgressFn<'_>,
    ) -> Result<ReportBody> {
        let repository: &R = &self.repository;

        let user = repository
            .user_info(username)
            .await
            .with_context(|| format!("Failed to load user profile @{}", username))?;
        info!(
            "Loaded profile @{} ({} followers, {} videos)",
            user.unique_id(),
            user.follower_count().unwrap_or_default(),
            user.video_count().unwrap_or_default()
        );

        let user_ref = &user;
        match scope {
            UserScope::Videos => {
                let videos = collect_pages(
                    limit,
                    move |cursor| repository.user_videos_page(user_ref, cursor),
                    progress,
                )
                .await
                .with_context(|| format!("Failed to extract videos of @{}", username))?;
                Ok(ReportBody::user_videos(user, videos))
            }
            UserScope::Followers => {
                let followers = collect_pages(
                    limit,
                    move |cursor| repository.user_followers_page(user_ref, cursor),
                    progress,
                )
                .await
                .with_context(|| format!("Failed to extract followers of @{}", username))?;
                Ok(ReportBody::user_followers(user, followers))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::pagination::no_progress;
    use crate::domain::entities::{Page, User, Video};
    use crate::domain::repositories::tiktok_repository::MockTikTokRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    fn alice() -> User {
        User::new(json!({ "uniqueId": "alice", "secUid": "SEC", "videoCount": 3 }))
    }

    #[tokio::test]
    async fn test_scrape_user_videos() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_user_info()
            .with(eq("alice"))
            .times(1)
            .returning(|_| Ok(alice()));
        mock.expect_user_videos_page()
            .times(2)
            .returning(|_, cursor| {
                if cursor == 0 {
                    Ok(Page::new(
                        vec![Video::new(json!({ "id": "1" })), Video::new(json!({ "id": "2" }))],
                        true,
                        2,
                    ))
                } else {
                    Ok(Page::last(vec![Video::new(json!({ "id": "3" }))]))
                }
            });

        let use_case = ScrapeUserUseCase::new(Arc::new(mock));
        let body = use_case
            .execute("alice", UserScope::Videos, 10, &no_progress)
            .await
            .unwrap();

        match body {
            ReportBody::UserVideos {
                user,
                videos,
                total_videos,
            } => {
                assert_eq!(user.unique_id(), "alice");
                assert_eq!(total_videos, 3);
                assert_eq!(videos[2].id(), "3");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scrape_user_respects_limit() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_user_info().returning(|_| Ok(alice()));
        mock.expect_user_videos_page().times(1).returning(|_, _| {
            Ok(Page::new(
                (0..30).map(|i| Video::new(json!({ "id": i }))).collect(),
                true,
                30,
            ))
        });

        let use_case = ScrapeUserUseCase::new(Arc::new(mock));
        let body = use_case
            .execute("alice", UserScope::Videos, 5, &no_progress)
            .await
            .unwrap();

        assert_eq!(body.item_count(), 5);
    }

    #[tokio::test]
    async fn test_scrape_user_followers_skips_videos() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_user_info().returning(|_| Ok(alice()));
        mock.expect_user_videos_page().never();
        mock.expect_user_followers_page()
            .returning(|_, _| Ok(Page::last(vec![User::new(json!({ "uniqueId": "bob" }))])));

        let use_case = ScrapeUserUseCase::new(Arc::new(mock));
        let body = use_case
            .execute("alice", UserScope::Followers, 100, &no_progress)
            .await
            .unwrap();

        assert!(matches!(
            body,
            ReportBody::UserFollowers {
                total_followers: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_scrape_user_profile_failure() {
        let mut mock = MockTikTokRepository::new();
        mock.expect_user_info()
            .returning(|_| Err(anyhow::anyhow!("user not found")));

        let use_case = ScrapeUserUseCase::new(Arc::new(mock));
        let result = use_case
            .execute("ghost", UserScope::Videos, 10, &no_progress)
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("@ghost"));
        assert!(format!("{:#}", err).contains("user not found"));
    }
}
