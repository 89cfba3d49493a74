//! # Report Repository Trait
//!
//! レポートの書き出しを抽象化

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{OutputFormat, ScrapeReport};

/// レポートリポジトリ
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// レポートを指定形式で保存する
    ///
    /// # Arguments
    ///
    /// * `path` - 出力ファイルのパス
    /// * `format` - 出力形式（JSON / CSV）
    /// * `report` - 保存するレポート
    ///
    /// # Errors
    ///
    /// シリアライズまたはファイルの書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &Path, format: OutputFormat, report: &ScrapeReport) -> Result<()>;
}
