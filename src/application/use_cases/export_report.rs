//! # Export Report Use Case
//!
//! レポートをファイルに書き出すユースケース

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use crate::application::dto::scrape_request::ScrapeRequest;
use crate::domain::entities::{OutputFormat, ScrapeReport};
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::services::file_naming::FileNamingService;

/// レポート出力ユースケース
pub struct ExportReportUseCase<W: ReportRepository> {
    report_repository: Arc<W>,
}

impl<W: ReportRepository> ExportReportUseCase<W> {
    pub fn new(report_repository: Arc<W>) -> Self {
        Self { report_repository }
    }

    /// 要求に対応する出力パス（`--output` がなければ既定のファイル名）
    pub fn output_path(request: &ScrapeRequest) -> PathBuf {
        match &request.output {
            Some(path) => path.clone(),
            None => PathBuf::from(FileNamingService::default_file_name(
                request.target.mode(),
                request.target.file_label().as_deref(),
                request.format,
                request.mock && !request.quiet,
                Local::now(),
            )),
        }
    }

    /// レポートを保存する
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        report: &ScrapeReport,
        format: OutputFormat,
        path: &Path,
    ) -> Result<()> {
        self.report_repository
            .save(path, format, report)
            .await
            .with_context(|| format!("Failed to save output to {}", path.display()))?;

        info!(
            "Saved {} report ({} items) to {}",
            report.body.mode(),
            report.body.item_count(),
            path.display()
        );
        Ok(())
    }
}
