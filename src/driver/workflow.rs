//! Workflow Orchestration
//!
//! スクレイピング全体のオーケストレーション

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::{FileReportRepository, FileTokenRepository};
use crate::adapter::synthetic::SyntheticTikTokRepository;
use crate::adapter::tiktok::{Endpoints, TikTokWebRepository, UreqHttpClient};
use crate::application::dto::scrape_request::{ScrapeRequest, ScrapeTarget};
use crate::application::use_cases::export_report::ExportReportUseCase;
use crate::application::use_cases::scrape_hashtag::ScrapeHashtagUseCase;
use crate::application::use_cases::scrape_trending::ScrapeTrendingUseCase;
use crate::application::use_cases::scrape_user::{ScrapeUserUseCase, UserScope};
use crate::application::use_cases::scrape_video::ScrapeVideoUseCase;
use crate::domain::entities::{ReportBody, ScrapeMode, ScrapeReport};
use crate::domain::repositories::tiktok_repository::TikTokRepository;
use crate::domain::repositories::token_repository::TokenRepository;

use super::cli::Args;

/// 表示用の接頭辞（モックで `--quiet` でなければ `[MOCK] `）
fn mock_prefix(request: &ScrapeRequest) -> &'static str {
    if request.mock && !request.quiet {
        "[MOCK] "
    } else {
        ""
    }
}

/// 収集対象の説明（表示用）
pub fn describe_target(target: &ScrapeTarget) -> String {
    match target {
        ScrapeTarget::UserVideos { username, limit } => {
            format!("videos of @{} (limit {})", username, limit)
        }
        ScrapeTarget::UserFollowers { username, limit } => {
            format!("followers of @{} (limit {})", username, limit)
        }
        ScrapeTarget::Trending { limit } => format!("trending videos (limit {})", limit),
        ScrapeTarget::Hashtag { name, limit } => {
            format!("videos for #{} (limit {})", name, limit)
        }
        ScrapeTarget::Video {
            video,
            comment_limit: Some(limit),
        } => format!("video {} with up to {} comments", video, limit),
        ScrapeTarget::Video {
            video,
            comment_limit: None,
        } => format!("video {}", video),
    }
}

/// 収集した要素の名前（表示用）
fn item_label(target: &ScrapeTarget) -> &'static str {
    match target {
        ScrapeTarget::UserFollowers { .. } => "followers",
        ScrapeTarget::Video { .. } => "comments",
        _ => "videos",
    }
}

/// Scrape Workflow
pub struct ScrapeWorkflow {
    config: Config,
    export_use_case: ExportReportUseCase<FileReportRepository>,
    token_repository: Arc<FileTokenRepository>,
}

impl ScrapeWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let report_repo = Arc::new(FileReportRepository::new());
        let token_repo = Arc::new(FileTokenRepository::new());

        Self {
            config,
            export_use_case: ExportReportUseCase::new(report_repo),
            token_repository: token_repo,
        }
    }

    /// Execute the scrape workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        let options = args.to_options();
        let mode = ScrapeMode::from(args.mode);
        for flag in options.ignored_flags() {
            println!("⚠ {} has no effect in {} mode", flag, mode);
        }

        let request = ScrapeRequest::from_options(&options, &self.config.scrape_defaults())?;
        let prefix = mock_prefix(&request);
        info!("Scrape request: {:?}", request.target);

        if request.mock {
            println!("✓ {}Generating mock data: {}", prefix, describe_target(&request.target));
            let repository = Arc::new(SyntheticTikTokRepository::new(
                self.config.page_size as usize,
            ));
            return self.run(repository, &request).await;
        }

        let session = request.session.as_deref().unwrap_or_default();
        let token = self
            .token_repository
            .resolve(session)
            .await
            .context("Invalid --session")?;
        println!("✓ Using msToken {}", token.redacted());

        let endpoints = Endpoints::new(&self.config, token)?;
        let client = Arc::new(UreqHttpClient::new(self.config.timeout()));
        let repository = Arc::new(TikTokWebRepository::new(client, endpoints));

        println!("✓ Extracting {}", describe_target(&request.target));
        self.run(repository, &request).await
    }

    /// リポジトリを使って収集し、ファイルに書き出す
    async fn run<R: TikTokRepository>(
        &self,
        repository: Arc<R>,
        request: &ScrapeRequest,
    ) -> Result<()> {
        let prefix = mock_prefix(request);
        let label = item_label(&request.target);
        let progress = move |count: usize| {
            println!("  {}Extracted {} {} so far...", prefix, count, label);
        };

        let body = match &request.target {
            ScrapeTarget::UserVideos { username, limit } => {
                ScrapeUserUseCase::new(repository)
                    .execute(username, UserScope::Videos, *limit, &progress)
                    .await?
            }
            ScrapeTarget::UserFollowers { username, limit } => {
                ScrapeUserUseCase::new(repository)
                    .execute(username, UserScope::Followers, *limit, &progress)
                    .await?
            }
            ScrapeTarget::Trending { limit } => {
                ScrapeTrendingUseCase::new(repository)
                    .execute(*limit, &progress)
                    .await?
            }
            ScrapeTarget::Hashtag { name, limit } => {
                ScrapeHashtagUseCase::new(repository)
                    .execute(name, *limit, &progress)
                    .await?
            }
            ScrapeTarget::Video {
                video,
                comment_limit,
            } => {
                ScrapeVideoUseCase::new(repository)
                    .execute(video, *comment_limit, &progress)
                    .await?
            }
        };

        print_summary(&body, prefix);

        let mut report = ScrapeReport::now(body);
        if request.mock && !request.quiet {
            report = report.mark_mock();
        }

        let path = ExportReportUseCase::<FileReportRepository>::output_path(request);
        self.export_use_case
            .execute(&report, request.format, &path)
            .await?;

        println!("✓ {}Data saved to: {}", prefix, path.display());
        Ok(())
    }
}

/// 収集結果の要約を表示する
fn print_summary(body: &ReportBody, prefix: &str) {
    match body {
        ReportBody::UserVideos { user, .. } | ReportBody::UserFollowers { user, .. } => {
            println!(
                "✓ {}Profile loaded: {} (@{})",
                prefix,
                user.nickname(),
                user.unique_id()
            );
            println!("  Followers: {}", user.follower_count().unwrap_or_default());
            println!("  Following: {}", user.following_count().unwrap_or_default());
            println!("  Videos: {}", user.video_count().unwrap_or_default());
        }
        ReportBody::Video { video, .. } => {
            println!("✓ {}Video loaded: {}", prefix, video.description());
            println!("  Views: {}", video.play_count().unwrap_or_default());
            println!("  Likes: {}", video.digg_count().unwrap_or_default());
        }
        ReportBody::Trending { .. } | ReportBody::Hashtag { .. } => {}
    }

    match body {
        ReportBody::UserVideos { total_videos, .. }
        | ReportBody::Trending { total_videos, .. }
        | ReportBody::Hashtag { total_videos, .. } => {
            println!("✓ {}Total videos extracted: {}", prefix, total_videos)
        }
        ReportBody::UserFollowers {
            total_followers, ..
        } => println!("✓ {}Total followers extracted: {}", prefix, total_followers),
        ReportBody::Video {
            total_comments: Some(total),
            ..
        } => println!("✓ {}Total comments extracted: {}", prefix, total),
        ReportBody::Video { .. } => {}
    }
}
