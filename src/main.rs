//! TikTok Scraper
//!
//! TikTok のユーザー・トレンド・ハッシュタグ・動画のデータを JSON / CSV に抽出

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use tiktok_scraper::adapter::config::Config;
use tiktok_scraper::driver::{Args, ScrapeWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = ScrapeWorkflow::new(config);

    workflow.execute(args).await
}
