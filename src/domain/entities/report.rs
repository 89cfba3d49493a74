//! # Scrape Report Entity
//!
//! 出力ファイルに書き出すレポート

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::record::{Comment, User, Video};

/// モックデータであることを示す注記
pub const MOCK_NOTE: &str = "This is mock/test data generated for testing purposes";

/// スクレイピング対象のカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrapeMode {
    #[default]
    User,
    Trending,
    Hashtag,
    Video,
}

impl ScrapeMode {
    /// `--target` が必須かどうか（trending のみ不要）
    pub fn requires_target(&self) -> bool {
        !matches!(self, ScrapeMode::Trending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeMode::User => "user",
            ScrapeMode::Trending => "trending",
            ScrapeMode::Hashtag => "hashtag",
            ScrapeMode::Video => "video",
        }
    }
}

impl fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// ファイル拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// モードごとのレポート本体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportBody {
    UserVideos {
        user: User,
        videos: Vec<Video>,
        total_videos: usize,
    },
    UserFollowers {
        user: User,
        followers: Vec<User>,
        total_followers: usize,
    },
    Trending {
        videos: Vec<Video>,
        total_videos: usize,
    },
    Hashtag {
        hashtag: String,
        videos: Vec<Video>,
        total_videos: usize,
    },
    Video {
        video: Video,
        #[serde(skip_serializing_if = "Option::is_none")]
        comments: Option<Vec<Comment>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        total_comments: Option<usize>,
    },
}

impl ReportBody {
    pub fn user_videos(user: User, videos: Vec<Video>) -> Self {
        let total_videos = videos.len();
        ReportBody::UserVideos {
            user,
            videos,
            total_videos,
        }
    }

    pub fn user_followers(user: User, followers: Vec<User>) -> Self {
        let total_followers = followers.len();
        ReportBody::UserFollowers {
            user,
            followers,
            total_followers,
        }
    }

    pub fn trending(videos: Vec<Video>) -> Self {
        let total_videos = videos.len();
        ReportBody::Trending {
            videos,
            total_videos,
        }
    }

    pub fn hashtag(hashtag: impl Into<String>, videos: Vec<Video>) -> Self {
        let total_videos = videos.len();
        ReportBody::Hashtag {
            hashtag: hashtag.into(),
            videos,
            total_videos,
        }
    }

    /// 動画レポート（`comments` が `None` ならコメント欄を出力しない）
    pub fn video(video: Video, comments: Option<Vec<Comment>>) -> Self {
        let total_comments = comments.as_ref().map(Vec::len);
        ReportBody::Video {
            video,
            comments,
            total_comments,
        }
    }

    pub fn mode(&self) -> ScrapeMode {
        match self {
            ReportBody::UserVideos { .. } | ReportBody::UserFollowers { .. } => ScrapeMode::User,
            ReportBody::Trending { .. } => ScrapeMode::Trending,
            ReportBody::Hashtag { .. } => ScrapeMode::Hashtag,
            ReportBody::Video { .. } => ScrapeMode::Video,
        }
    }

    /// 収集した要素数（動画・フォロワー・コメント）
    pub fn item_count(&self) -> usize {
        match self {
            ReportBody::UserVideos { total_videos, .. }
            | ReportBody::Trending { total_videos, .. }
            | ReportBody::Hashtag { total_videos, .. } => *total_videos,
            ReportBody::UserFollowers {
                total_followers, ..
            } => *total_followers,
            ReportBody::Video { total_comments, .. } => total_comments.unwrap_or(0),
        }
    }
}

/// 出力ファイルに書き出すレポート
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeReport {
    #[serde(flatten)]
    pub body: ReportBody,
    /// 抽出日時（ローカル時刻、ISO 8601）
    pub extracted_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ScrapeReport {
    /// 抽出日時を指定して作成
    pub fn new(body: ReportBody, extracted_at: DateTime<Local>) -> Self {
        Self {
            body,
            extracted_at: extracted_at
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            mock_mode: None,
            note: None,
        }
    }

    /// 現在時刻で作成
    pub fn now(body: ReportBody) -> Self {
        Self::new(body, Local::now())
    }

    /// モックデータであることを示すフィールドを付与
    pub fn mark_mock(mut self) -> Self {
        self.mock_mode = Some(true);
        self.note = Some(MOCK_NOTE.to_string());
        self
    }

    pub fn is_mock(&self) -> bool {
        self.mock_mode.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 12, 25, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_requires_target() {
        assert!(ScrapeMode::User.requires_target());
        assert!(ScrapeMode::Hashtag.requires_target());
        assert!(ScrapeMode::Video.requires_target());
        assert!(!ScrapeMode::Trending.requires_target());
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_user_videos_serialization() {
        let body = ReportBody::user_videos(
            User::new(json!({ "uniqueId": "alice" })),
            vec![Video::new(json!({ "id": "1" })), Video::new(json!({ "id": "2" }))],
        );
        let report = ScrapeReport::new(body, fixed_time());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["user"]["uniqueId"], "alice");
        assert_eq!(value["videos"].as_array().unwrap().len(), 2);
        assert_eq!(value["total_videos"], 2);
        assert_eq!(value["extracted_at"], "2024-12-25T10:30:00.000000");
        assert!(value.get("mock_mode").is_none());
        assert!(value.get("note").is_none());
    }

    #[test]
    fn test_video_without_comments_omits_fields() {
        let body = ReportBody::video(Video::new(json!({ "id": "9" })), None);
        let value = serde_json::to_value(ScrapeReport::new(body, fixed_time())).unwrap();

        assert_eq!(value["video"]["id"], "9");
        assert!(value.get("comments").is_none());
        assert!(value.get("total_comments").is_none());
    }

    #[test]
    fn test_video_with_comments() {
        let body = ReportBody::video(
            Video::new(json!({ "id": "9" })),
            Some(vec![Comment::new(json!({ "cid": "c1" }))]),
        );
        assert_eq!(body.item_count(), 1);

        let value = serde_json::to_value(ScrapeReport::new(body, fixed_time())).unwrap();
        assert_eq!(value["total_comments"], 1);
        assert_eq!(value["comments"][0]["cid"], "c1");
    }

    #[test]
    fn test_hashtag_and_mock_marker() {
        let body = ReportBody::hashtag("cats", vec![]);
        let report = ScrapeReport::new(body, fixed_time()).mark_mock();
        assert!(report.is_mock());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["hashtag"], "cats");
        assert_eq!(value["total_videos"], 0);
        assert_eq!(value["mock_mode"], true);
        assert_eq!(value["note"], MOCK_NOTE);
    }

    #[test]
    fn test_body_mode() {
        assert_eq!(ReportBody::trending(vec![]).mode(), ScrapeMode::Trending);
        assert_eq!(
            ReportBody::user_followers(User::new(json!({})), vec![]).mode(),
            ScrapeMode::User
        );
    }
}
