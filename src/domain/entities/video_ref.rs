//! # Video Reference
//!
//! `--target` に渡された動画ID、または動画URL

use std::fmt;

/// 動画の指定方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoRef {
    /// 数字のみの動画ID
    Id(String),
    /// tiktok.com の動画URL
    Url(String),
}

impl VideoRef {
    /// `--target` の値を解釈する
    ///
    /// `tiktok.com` を含む値はURLとして扱い、それ以外はIDとして扱う。
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        if target.contains("tiktok.com") {
            VideoRef::Url(target.to_string())
        } else {
            VideoRef::Id(target.to_string())
        }
    }

    /// 動画IDを取得する
    ///
    /// URLの場合は `/video/<id>` もしくは `/photo/<id>` のパス要素から取り出す。
    /// 短縮URL（vm.tiktok.com など）からはIDを取り出せないため `None` を返す。
    ///
    /// # 例
    ///
    /// ```
    /// use tiktok_scraper::domain::entities::VideoRef;
    ///
    /// let by_url = VideoRef::parse("https://www.tiktok.com/@alice/video/7301234567890123456?lang=en");
    /// assert_eq!(by_url.video_id().as_deref(), Some("7301234567890123456"));
    ///
    /// let by_id = VideoRef::parse("7301234567890123456");
    /// assert_eq!(by_id.video_id().as_deref(), Some("7301234567890123456"));
    ///
    /// let short = VideoRef::parse("https://vm.tiktok.com/ZMabc123/");
    /// assert!(short.video_id().is_none());
    /// ```
    pub fn video_id(&self) -> Option<String> {
        match self {
            VideoRef::Id(id) => {
                if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                    Some(id.clone())
                } else {
                    None
                }
            }
            VideoRef::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or_default();
                let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
                segments
                    .windows(2)
                    .find(|pair| pair[0] == "video" || pair[0] == "photo")
                    .map(|pair| pair[1])
                    .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
                    .map(str::to_string)
            }
        }
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoRef::Id(id) => write!(f, "{}", id),
            VideoRef::Url(url) => write!(f, "{}", url),
        }
    }
}
