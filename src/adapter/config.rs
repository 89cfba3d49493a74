//! # Configuration
//!
//! JSON設定ファイルの読み込み
//!
//! ファイルが存在しない場合は既定値を使う。未知のフィールドはエラーにする。

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::application::dto::scrape_request::ScrapeDefaults;

/// 既定のUser-Agent（デスクトップ版Chrome）
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// TikTok のベースURL
    pub base_url: String,
    pub user_agent: String,
    /// `region` クエリパラメータ
    pub region: String,
    /// `app_language` クエリパラメータ
    pub language: String,
    /// リクエスト全体のタイムアウト（秒）
    pub timeout_secs: u64,
    /// 1ページあたりの要求件数
    pub page_size: u32,

    // 件数の既定値
    pub default_video_limit: usize,
    pub default_feed_limit: usize,
    pub default_follower_limit: usize,
    pub default_comment_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = ScrapeDefaults::default();
        Self {
            base_url: "https://www.tiktok.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            region: "US".to_string(),
            language: "en".to_string(),
            timeout_secs: 30,
            page_size: 30,
            default_video_limit: defaults.video_limit,
            default_feed_limit: defaults.feed_limit,
            default_follower_limit: defaults.follower_limit,
            default_comment_limit: defaults.comment_limit,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// # Errors
    ///
    /// ファイルが読めない場合、またはJSONが不正な場合にエラーを返す
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        let path = Path::new(&expanded);

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// ユースケース用の件数既定値
    pub fn scrape_defaults(&self) -> ScrapeDefaults {
        ScrapeDefaults {
            video_limit: self.default_video_limit,
            feed_limit: self.default_feed_limit,
            follower_limit: self.default_follower_limit,
            comment_limit: self.default_comment_limit,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/tiktok-scraper.json").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "https://www.tiktok.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "region": "JP", "default_comment_limit": 5 }}"#).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.region, "JP");
        assert_eq!(config.language, "en");
        assert_eq!(config.scrape_defaults().comment_limit, 5);
        assert_eq!(config.scrape_defaults().video_limit, 1000);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "proxy": "http://localhost:8080" }}"#).unwrap();

        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown field"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
