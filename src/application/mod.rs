//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてスクレイピングの流れを実現
//! - Repository traitに依存（TikTok Web API・モックデータのどちらでも動く）
//! - HTTPやSQLiteの詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: CLIオプションと検証済みリクエスト
//! - **use_cases**: ユースケース

pub mod dto;
pub mod use_cases;
