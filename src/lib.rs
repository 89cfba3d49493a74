//! # TikTok Scraper
//!
//! TikTok のユーザー・トレンド・ハッシュタグ・動画のデータを JSON / CSV に抽出するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: レコード、レポート、CSV変換などのビジネスルール（外部依存なし）
//! - **Application層**: ページング付きの収集、レポート出力、msToken 抽出（ユースケース）
//! - **Adapter層**: 外部システムとの統合（TikTok Web API, ブラウザのCookie, ファイルシステム等）
//! - **Driver層**: CLI、依存性注入
//!
//! バイナリは `tiktok-scraper`（収集）と `extract_ms_token`（トークン抽出）の2つ。

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時にネットワーク依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
