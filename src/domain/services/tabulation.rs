//! # Tabulation Service
//!
//! レポートをCSVの行に変換するビジネスルール
//!
//! 行の長さは揃っていない（`Type,Field,Value` 形式の概要と一覧表が同じファイルに並ぶ）。
//! 空行は空の `Vec` で表す。

use crate::domain::entities::{Comment, ReportBody, ScrapeReport, User, Video};

/// 説明文・コメント本文の最大文字数
pub const TEXT_TRUNCATE_CHARS: usize = 100;

const VIDEO_HEADER: [&str; 7] = [
    "Video ID",
    "Description",
    "Likes",
    "Shares",
    "Comments",
    "Views",
    "Created",
];

const FEED_HEADER: [&str; 8] = [
    "Video ID",
    "Author",
    "Description",
    "Likes",
    "Shares",
    "Comments",
    "Views",
    "Created",
];

const FOLLOWER_HEADER: [&str; 7] = [
    "Follower ID",
    "Username",
    "Nickname",
    "Followers",
    "Following",
    "Videos",
    "Verified",
];

const COMMENT_HEADER: [&str; 5] = ["Comment ID", "Author", "Text", "Likes", "Created"];

/// CSV変換サービス
pub struct TabulationService;

impl TabulationService {
    /// レポートをCSVの行に変換する
    ///
    /// # Arguments
    ///
    /// * `report` - 変換するレポート
    ///
    /// # Returns
    ///
    /// CSVの行のリスト（空の行は空行）
    pub fn rows(report: &ScrapeReport) -> Vec<Vec<String>> {
        match &report.body {
            ReportBody::UserVideos { user, videos, .. } => {
                let mut rows = Self::user_summary(user);
                rows.push(Vec::new());
                rows.push(header(&VIDEO_HEADER));
                rows.extend(videos.iter().map(Self::video_row));
                rows
            }
            ReportBody::UserFollowers {
                user, followers, ..
            } => {
                let mut rows = Self::user_summary(user);
                rows.push(Vec::new());
                rows.push(header(&FOLLOWER_HEADER));
                rows.extend(followers.iter().map(Self::follower_row));
                rows
            }
            ReportBody::Trending { videos, .. } | ReportBody::Hashtag { videos, .. } => {
                let mut rows = vec![header(&FEED_HEADER)];
                rows.extend(videos.iter().map(Self::feed_row));
                rows
            }
            ReportBody::Video {
                video, comments, ..
            } => {
                let mut rows = Self::video_summary(video);
                if let Some(comments) = comments.as_ref().filter(|c| !c.is_empty()) {
                    rows.push(Vec::new());
                    rows.push(header(&COMMENT_HEADER));
                    rows.extend(comments.iter().map(Self::comment_row));
                }
                rows
            }
        }
    }

    /// 文字数（バイト数ではない）で切り詰める
    pub fn truncate(text: &str) -> String {
        text.chars().take(TEXT_TRUNCATE_CHARS).collect()
    }

    fn user_summary(user: &User) -> Vec<Vec<String>> {
        vec![
            header(&["Type", "Field", "Value"]),
            field_row("User", "username", user.unique_id()),
            field_row("User", "nickname", user.nickname()),
            field_row("User", "followers", user.field("/followerCount")),
            field_row("User", "following", user.field("/followingCount")),
            field_row("User", "videos", user.field("/videoCount")),
        ]
    }

    fn video_summary(video: &Video) -> Vec<Vec<String>> {
        vec![
            header(&["Type", "Field", "Value"]),
            field_row("Video", "id", video.id()),
            field_row("Video", "description", video.description()),
            field_row("Video", "author", video.author_unique_id()),
            field_row("Video", "likes", video.stat("diggCount")),
            field_row("Video", "shares", video.stat("shareCount")),
            field_row("Video", "comments", video.stat("commentCount")),
            field_row("Video", "views", video.stat("playCount")),
        ]
    }

    fn video_row(video: &Video) -> Vec<String> {
        vec![
            video.id(),
            Self::truncate(&video.description()),
            video.stat("diggCount"),
            video.stat("shareCount"),
            video.stat("commentCount"),
            video.stat("playCount"),
            video.create_time(),
        ]
    }

    fn feed_row(video: &Video) -> Vec<String> {
        vec![
            video.id(),
            video.author_unique_id(),
            Self::truncate(&video.description()),
            video.stat("diggCount"),
            video.stat("shareCount"),
            video.stat("commentCount"),
            video.stat("playCount"),
            video.create_time(),
        ]
    }

    fn follower_row(follower: &User) -> Vec<String> {
        let verified = follower.field("/verified");
        vec![
            follower.id(),
            follower.unique_id(),
            follower.nickname(),
            follower.field("/followerCount"),
            follower.field("/followingCount"),
            follower.field("/videoCount"),
            if verified.is_empty() {
                "false".to_string()
            } else {
                verified
            },
        ]
    }

    fn comment_row(comment: &Comment) -> Vec<String> {
        vec![
            comment.comment_id(),
            comment.author_unique_id(),
            Self::truncate(&comment.text()),
            comment.digg_count(),
            comment.create_time(),
        ]
    }
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn field_row(kind: &str, field: &str, value: String) -> Vec<String> {
    vec![kind.to_string(), field.to_string(), value]
}
