//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ScrapeUserUseCase**: ユーザーの動画・フォロワーの取得
//! - **ScrapeTrendingUseCase**: おすすめフィードの取得
//! - **ScrapeHashtagUseCase**: ハッシュタグの動画の取得
//! - **ScrapeVideoUseCase**: 動画とコメントの取得
//! - **ExportReportUseCase**: レポートのファイル出力
//! - **ExtractTokenUseCase**: ブラウザCookieからの msToken 抽出

pub mod export_report;
pub mod extract_token;
pub mod pagination;
pub mod scrape_hashtag;
pub mod scrape_trending;
pub mod scrape_user;
pub mod scrape_video;
