//! # Cookie Repository Trait
//!
//! ブラウザのCookieデータベースの発見と読み取りを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::{Browser, CookieDatabase, CookieLookup};

/// Cookieリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CookieRepository: Send + Sync {
    /// ブラウザの全プロファイルからCookieデータベースを発見する
    ///
    /// # Returns
    ///
    /// 発見されたデータベースのリスト（Default プロファイルが先頭）
    async fn discover(&self, browser: Browser) -> Result<Vec<CookieDatabase>>;

    /// データベースにTikTokのCookieが含まれるか
    ///
    /// 読み取れないデータベースは `false` として扱う
    async fn has_tiktok_cookies(&self, database: &CookieDatabase) -> bool;

    /// データベースから最新の msToken を探す
    ///
    /// # Errors
    ///
    /// データベースを開けない場合にエラーを返す
    async fn lookup_ms_token(&self, database: &CookieDatabase) -> Result<CookieLookup>;
}
