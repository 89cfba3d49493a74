//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::application::dto::scrape_request::ScrapeOptions;
use crate::domain::entities::{OutputFormat, ScrapeMode};

/// スクレイピングモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliMode {
    User,
    Trending,
    Hashtag,
    Video,
}

impl From<CliMode> for ScrapeMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::User => ScrapeMode::User,
            CliMode::Trending => ScrapeMode::Trending,
            CliMode::Hashtag => ScrapeMode::Hashtag,
            CliMode::Video => ScrapeMode::Video,
        }
    }
}

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliFormat {
    Json,
    Csv,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Csv => OutputFormat::Csv,
        }
    }
}

/// TikTokのデータをJSON/CSVに抽出するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "tiktok-scraper")]
#[command(
    about = "Extract TikTok user, trending, hashtag and video data to JSON or CSV",
    long_about = None
)]
pub struct Args {
    /// Scraping mode
    #[arg(short, long, value_enum)]
    pub mode: CliMode,

    /// Username, hashtag, or video ID/URL (not needed for trending)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Path to a file containing ms_token, or the ms_token value itself
    #[arg(short, long)]
    pub session: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliFormat::Json)]
    pub format: CliFormat,

    /// Output file path (default: auto-generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of items to extract
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Include comments (video mode)
    #[arg(long)]
    pub comments: bool,

    /// Maximum number of comments (default: 30)
    #[arg(long)]
    pub comment_limit: Option<usize>,

    /// Extract followers instead of videos (user mode)
    #[arg(long)]
    pub followers: bool,

    /// Maximum number of followers (default: 100)
    #[arg(long)]
    pub follower_limit: Option<usize>,

    /// Generate mock data instead of calling TikTok
    #[arg(long)]
    pub mock: bool,

    /// Omit mock markers from output and file name
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file path
    #[arg(short, long, default_value = "./tiktok-scraper.json")]
    pub config: String,
}

impl Args {
    /// 検証前のオプションレコードに変換
    pub fn to_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            mode: self.mode.into(),
            target: self.target.clone(),
            session: self.session.clone(),
            format: self.format.into(),
            output: self.output.clone(),
            limit: self.limit,
            comments: self.comments,
            comment_limit: self.comment_limit,
            followers: self.followers,
            follower_limit: self.follower_limit,
            mock: self.mock,
            quiet: self.quiet,
        }
    }
}
