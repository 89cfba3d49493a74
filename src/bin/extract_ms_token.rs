//! ms_token Extractor
//!
//! ブラウザのCookieデータベースから TikTok の msToken を取り出す

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use tiktok_scraper::driver::{TokenArgs, TokenWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = TokenArgs::parse();

    TokenWorkflow::new().execute(args).await
}
