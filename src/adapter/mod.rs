//! Adapter Layer
//!
//! 外部システム（TikTok Web API, ブラウザのCookieデータベース, ファイルシステム）との統合

pub mod browser;
pub mod config;
pub mod repositories;
pub mod synthetic;
pub mod tiktok;
