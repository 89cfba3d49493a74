//! # Scrape Request DTO
//!
//! CLIオプションのレコードと、その検証済み表現

use std::path::PathBuf;

use crate::domain::entities::{OutputFormat, ScrapeMode, VideoRef};
use crate::domain::error::ValidationError;

/// 件数制限の既定値（設定ファイルから供給される）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeDefaults {
    /// user モードの動画件数
    pub video_limit: usize,
    /// trending / hashtag モードの動画件数
    pub feed_limit: usize,
    /// フォロワー件数
    pub follower_limit: usize,
    /// コメント件数
    pub comment_limit: usize,
}

impl Default for ScrapeDefaults {
    fn default() -> Self {
        Self {
            video_limit: 1000,
            feed_limit: 100,
            follower_limit: 100,
            comment_limit: 30,
        }
    }
}

/// CLIオプションのレコード（未検証）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeOptions {
    pub mode: ScrapeMode,
    pub target: Option<String>,
    pub session: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub limit: Option<usize>,
    pub comments: bool,
    pub comment_limit: Option<usize>,
    pub followers: bool,
    pub follower_limit: Option<usize>,
    pub mock: bool,
    pub quiet: bool,
}

/// 何を収集するか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeTarget {
    UserVideos { username: String, limit: usize },
    UserFollowers { username: String, limit: usize },
    Trending { limit: usize },
    Hashtag { name: String, limit: usize },
    Video {
        video: VideoRef,
        /// `--comments` 指定時のみ `Some`
        comment_limit: Option<usize>,
    },
}

impl ScrapeTarget {
    pub fn mode(&self) -> ScrapeMode {
        match self {
            ScrapeTarget::UserVideos { .. } | ScrapeTarget::UserFollowers { .. } => {
                ScrapeMode::User
            }
            ScrapeTarget::Trending { .. } => ScrapeMode::Trending,
            ScrapeTarget::Hashtag { .. } => ScrapeMode::Hashtag,
            ScrapeTarget::Video { .. } => ScrapeMode::Video,
        }
    }

    /// 出力ファイル名に使う対象名
    pub fn file_label(&self) -> Option<String> {
        match self {
            ScrapeTarget::UserVideos { username, .. }
            | ScrapeTarget::UserFollowers { username, .. } => Some(username.clone()),
            ScrapeTarget::Trending { .. } => None,
            ScrapeTarget::Hashtag { name, .. } => Some(name.clone()),
            ScrapeTarget::Video { video, .. } => {
                Some(video.video_id().unwrap_or_else(|| video.to_string()))
            }
        }
    }
}

/// 検証済みのスクレイピング要求
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub target: ScrapeTarget,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// msToken のファイルパスまたは値（モック時は `None` の場合あり）
    pub session: Option<String>,
    pub mock: bool,
    pub quiet: bool,
}

impl ScrapeRequest {
    /// オプションを検証して要求を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use tiktok_scraper::application::dto::scrape_request::{
    ///     ScrapeDefaults, ScrapeOptions, ScrapeRequest, ScrapeTarget,
    /// };
    /// use tiktok_scraper::domain::entities::ScrapeMode;
    /// use tiktok_scraper::domain::error::ValidationError;
    ///
    /// let options = ScrapeOptions {
    ///     mode: ScrapeMode::Hashtag,
    ///     target: Some("#cats".to_string()),
    ///     session: Some("ms_token.txt".to_string()),
    ///     ..Default::default()
    /// };
    /// let request = ScrapeRequest::from_options(&options, &ScrapeDefaults::default()).unwrap();
    /// assert_eq!(
    ///     request.target,
    ///     ScrapeTarget::Hashtag { name: "cats".to_string(), limit: 100 }
    /// );
    ///
    /// // video モードで --target なしは拒否
    /// let missing = ScrapeOptions {
    ///     mode: ScrapeMode::Video,
    ///     session: Some("token".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     ScrapeRequest::from_options(&missing, &ScrapeDefaults::default()),
    ///     Err(ValidationError::MissingTarget(ScrapeMode::Video))
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// 必須の `--target` / `--session` がない場合、または動画IDを解釈できない場合
    pub fn from_options(
        options: &ScrapeOptions,
        defaults: &ScrapeDefaults,
    ) -> Result<Self, ValidationError> {
        let mode = options.mode;

        // `@alice` / `#cats` の記号を外した後に空なら未指定と同じ
        let target = options
            .target
            .as_deref()
            .map(|t| match mode {
                ScrapeMode::User => t.trim().trim_start_matches('@'),
                ScrapeMode::Hashtag => t.trim().trim_start_matches('#'),
                ScrapeMode::Trending | ScrapeMode::Video => t,
            })
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let limit = given(options.limit);

        if mode.requires_target() && target.is_none() {
            return Err(ValidationError::MissingTarget(mode));
        }

        let session = options
            .session
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if session.is_none() && !options.mock {
            return Err(ValidationError::MissingSession);
        }

        let target = match mode {
            ScrapeMode::User => {
                let username = target.unwrap_or_default().to_string();
                if options.followers {
                    ScrapeTarget::UserFollowers {
                        username,
                        limit: given(options.follower_limit)
                            .or(limit)
                            .unwrap_or(defaults.follower_limit),
                    }
                } else {
                    ScrapeTarget::UserVideos {
                        username,
                        limit: limit.unwrap_or(defaults.video_limit),
                    }
                }
            }
            ScrapeMode::Trending => ScrapeTarget::Trending {
                limit: limit.unwrap_or(defaults.feed_limit),
            },
            ScrapeMode::Hashtag => ScrapeTarget::Hashtag {
                name: target.unwrap_or_default().to_string(),
                limit: limit.unwrap_or(defaults.feed_limit),
            },
            ScrapeMode::Video => {
                let raw = target.unwrap_or_default();
                let video = VideoRef::parse(raw);
                if !options.mock && video.video_id().is_none() {
                    return Err(ValidationError::UnresolvableVideo(raw.to_string()));
                }
                ScrapeTarget::Video {
                    video,
                    comment_limit: options
                        .comments
                        .then(|| given(options.comment_limit).unwrap_or(defaults.comment_limit)),
                }
            }
        };

        Ok(Self {
            target,
            format: options.format,
            output: options.output.clone(),
            session,
            mock: options.mock,
            quiet: options.quiet,
        })
    }
}

/// 件数の指定（0 は未指定として既定値を使う）
fn given(limit: Option<usize>) -> Option<usize> {
    limit.filter(|&n| n > 0)
}

impl ScrapeOptions {
    /// 指定されたが、このモードでは使われないフラグ
    pub fn ignored_flags(&self) -> Vec<&'static str> {
        let mode = self.mode;
        let mut ignored = Vec::new();

        if mode == ScrapeMode::Trending && self.target.is_some() {
            ignored.push("--target");
        }
        if mode != ScrapeMode::Video && self.comments {
            ignored.push("--comments");
        }
        if mode != ScrapeMode::Video && self.comment_limit.is_some() {
            ignored.push("--comment-limit");
        }
        if mode != ScrapeMode::User && self.followers {
            ignored.push("--followers");
        }
        if mode != ScrapeMode::User && self.follower_limit.is_some() {
            ignored.push("--follower-limit");
        }
        if mode == ScrapeMode::Video && self.limit.is_some() {
            ignored.push("--limit");
        }
        if !self.mock && self.quiet {
            ignored.push("--quiet");
        }
        ignored
    }
}
