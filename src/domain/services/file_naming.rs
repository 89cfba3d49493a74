//! # File Naming Service
//!
//! `--output` 省略時の出力ファイル名を決める

use chrono::{DateTime, Local};

use crate::domain::entities::{OutputFormat, ScrapeMode};

/// 出力ファイル名サービス
pub struct FileNamingService;

impl FileNamingService {
    /// 既定の出力ファイル名を作成します。
    ///
    /// `tiktok_<mode>[_<target>][_mock]_<YYYYmmdd_HHMMSS>.<ext>` の形式。
    ///
    /// # 例
    ///
    /// ```
    /// use chrono::{Local, TimeZone};
    /// use tiktok_scraper::domain::entities::{OutputFormat, ScrapeMode};
    /// use tiktok_scraper::domain::services::file_naming::FileNamingService;
    ///
    /// let at = Local.with_ymd_and_hms(2024, 12, 25, 9, 5, 1).unwrap();
    ///
    /// let name = FileNamingService::default_file_name(
    ///     ScrapeMode::User, Some("alice"), OutputFormat::Json, false, at,
    /// );
    /// assert_eq!(name, "tiktok_user_alice_20241225_090501.json");
    ///
    /// let mock = FileNamingService::default_file_name(
    ///     ScrapeMode::Trending, None, OutputFormat::Csv, true, at,
    /// );
    /// assert_eq!(mock, "tiktok_trending_mock_20241225_090501.csv");
    /// ```
    pub fn default_file_name(
        mode: ScrapeMode,
        target: Option<&str>,
        format: OutputFormat,
        mock: bool,
        at: DateTime<Local>,
    ) -> String {
        let mut name = format!("tiktok_{}", mode.as_str());

        if let Some(target) = target.map(Self::sanitize).filter(|t| !t.is_empty()) {
            name.push('_');
            name.push_str(&target);
        }

        if mock {
            name.push_str("_mock");
        }

        format!(
            "{}_{}.{}",
            name,
            at.format("%Y%m%d_%H%M%S"),
            format.extension()
        )
    }

    /// ファイル名に使えない文字を `_` に置き換える
    pub fn sanitize(component: &str) -> String {
        component
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect::<String>()
            .trim_matches('.')
            .to_string()
    }
}
