//! # Domain Layer
//!
//! このモジュールはスクレイピング対象のレコードとビジネスルールを定義します。
//!
//! ## 特徴
//!
//! - HTTP・SQLite・ファイルシステムについて何も知らない
//! - レコードの形はTikTok APIが決める（ここでは薄いラッパーのみ）
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: レコード、ページ、セッショントークン、レポート
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: CSV表形式への変換、出力ファイル名の決定
//! - **error**: 型付きエラー

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
