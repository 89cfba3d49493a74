//! File Report Repository Implementation
//!
//! ReportRepositoryのファイル実装（JSON / CSV）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::entities::{OutputFormat, ScrapeReport};
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::services::tabulation::TabulationService;

/// ファイルシステムベースのレポートリポジトリ
pub struct FileReportRepository;

impl FileReportRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// レポートを保存する（同期処理）
    fn save_sync(path: &Path, format: OutputFormat, report: &ScrapeReport) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create output directory")?;
        }

        match format {
            OutputFormat::Json => Self::write_json(path, report)?,
            OutputFormat::Csv => Self::write_csv(path, report)?,
        }

        info!("Wrote {} to {}", format.extension(), path.display());
        Ok(())
    }

    fn write_json(path: &Path, report: &ScrapeReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        fs::write(path, json).context("Failed to write JSON output")?;
        Ok(())
    }

    fn write_csv(path: &Path, report: &ScrapeReport) -> Result<()> {
        let file = File::create(path).context("Failed to create CSV output")?;
        let mut out = BufWriter::new(file);

        // 空のレコードは `""` になるため、空行で区切った表ごとに書き込む
        let rows = TabulationService::rows(report);
        for (index, section) in rows.split(|row| row.is_empty()).enumerate() {
            if index > 0 {
                out.write_all(b"\n").context("Failed to write CSV row")?;
            }

            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(&mut out);
            for row in section {
                writer
                    .write_record(row)
                    .context("Failed to write CSV row")?;
            }
            writer.flush().context("Failed to flush CSV output")?;
        }

        out.flush().context("Failed to flush CSV output")?;
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for FileReportRepository {
    async fn save(&self, path: &Path, format: OutputFormat, report: &ScrapeReport) -> Result<()> {
        let path: PathBuf = path.to_path_buf();
        let report = report.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, format, &report))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}

impl Default for FileReportRepository {
    fn default() -> Self {
        Self::new()
    }
}
