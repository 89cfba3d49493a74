//! # Browser Cookie Entities
//!
//! ブラウザとCookieデータベースのエンティティ

use std::fmt;
use std::path::PathBuf;

/// msToken の取得元ブラウザ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Firefox,
    Chrome,
    Edge,
}

impl Browser {
    /// 優先指定がない場合の探索順（暗号化されないFirefoxが先）
    pub const SEARCH_ORDER: [Browser; 3] = [Browser::Firefox, Browser::Chrome, Browser::Edge];

    /// Chromium系（cookies テーブル、値の暗号化あり）か
    pub fn is_chromium(&self) -> bool {
        matches!(self, Browser::Chrome | Browser::Edge)
    }

    /// 探索するブラウザのリスト
    pub fn search_order(preferred: Option<Browser>) -> Vec<Browser> {
        match preferred {
            Some(browser) => vec![browser],
            None => Self::SEARCH_ORDER.to_vec(),
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Browser::Firefox => "Firefox",
            Browser::Chrome => "Chrome",
            Browser::Edge => "Edge",
        };
        f.write_str(name)
    }
}

/// ブラウザプロファイルのCookieデータベース
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDatabase {
    pub browser: Browser,
    pub path: PathBuf,
}

impl CookieDatabase {
    pub fn new(browser: Browser, path: impl Into<PathBuf>) -> Self {
        Self {
            browser,
            path: path.into(),
        }
    }
}

/// 1つのCookieデータベースを調べた結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieLookup {
    /// msToken が見つかった
    Found(String),
    /// msToken はあるが暗号化されていて読めない
    Encrypted,
    /// msToken がない（TikTokのCookie数を添える）
    Missing { tiktok_cookies: u64 },
}
