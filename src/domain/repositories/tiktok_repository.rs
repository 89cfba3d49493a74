//! # TikTok Repository Trait
//!
//! TikTok APIクライアントを抽象化
//!
//! 一覧系の操作は1ページずつ取得し、ページングと件数制限はApplication層で行う。

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::{Comment, Hashtag, Page, User, Video, VideoRef};

/// TikTokリポジトリ
///
/// 実際のWeb APIクライアントとモックデータ生成器の両方がこのtraitを実装する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TikTokRepository: Send + Sync {
    /// ユーザープロフィールを取得する
    ///
    /// # Arguments
    ///
    /// * `username` - `@` を除いたユーザー名
    async fn user_info(&self, username: &str) -> Result<User>;

    /// ユーザーの投稿動画を1ページ取得する
    async fn user_videos_page(&self, user: &User, cursor: i64) -> Result<Page<Video>>;

    /// ユーザーのフォロワーを1ページ取得する
    async fn user_followers_page(&self, user: &User, cursor: i64) -> Result<Page<User>>;

    /// トレンド（おすすめ）動画を1ページ取得する
    async fn trending_page(&self, cursor: i64) -> Result<Page<Video>>;

    /// ハッシュタグ情報を取得する
    ///
    /// # Arguments
    ///
    /// * `name` - `#` を除いたハッシュタグ名
    async fn hashtag_info(&self, name: &str) -> Result<Hashtag>;

    /// ハッシュタグの動画を1ページ取得する
    async fn hashtag_videos_page(&self, hashtag: &Hashtag, cursor: i64) -> Result<Page<Video>>;

    /// 動画の詳細を取得する
    async fn video_info(&self, video: &VideoRef) -> Result<Video>;

    /// 動画のコメントを1ページ取得する
    async fn video_comments_page(&self, video_id: &str, cursor: i64) -> Result<Page<Comment>>;
}
