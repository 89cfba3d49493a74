//! Token Extraction Workflow
//!
//! `extract_ms_token` のオーケストレーション

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::adapter::browser::{CookieProfileLocator, SqliteCookieRepository};
use crate::adapter::repositories::FileTokenRepository;
use crate::application::use_cases::extract_token::{ExtractTokenUseCase, ExtractionEvent};
use crate::domain::repositories::token_repository::TokenRepository;

use super::token_cli::TokenArgs;

/// 状態表示（`--stdout` のときは標準出力をトークン専用にするため標準エラーへ）
fn status(to_stderr: bool, line: &str) {
    if to_stderr {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

/// 抽出の途中経過を表示用の行に変換する
pub fn describe_event(event: &ExtractionEvent<'_>) -> Vec<String> {
    match event {
        ExtractionEvent::Trying(browser) => vec![format!("Trying {}...", browser)],
        ExtractionEvent::NoDatabases(browser) => {
            vec![format!("⚠ No {} cookie files found", browser)]
        }
        ExtractionEvent::Discovered(browser, count) => {
            vec![format!("✓ Found {} {} profile(s)", count, browser)]
        }
        ExtractionEvent::Checking(database) => {
            vec![format!("  Checking {}...", database.path.display())]
        }
        ExtractionEvent::Encrypted(database) => vec![
            format!(
                "⚠ Cookie value appears encrypted in {}",
                database.path.display()
            ),
            format!(
                "  Tip: close {} and try again, or use Firefox for automatic extraction",
                database.browser
            ),
        ],
        ExtractionEvent::NoToken {
            database,
            tiktok_cookies,
        } => vec![
            format!(
                "⚠ Found {} TikTok cookies but no msToken/ms_token cookie",
                tiktok_cookies
            ),
            format!(
                "  Tip: visit https://www.tiktok.com in {} and browse for a moment to generate the msToken cookie",
                database.browser
            ),
        ],
        ExtractionEvent::Unreadable { database, error } => {
            let mut lines = vec![format!(
                "⚠ Could not read {}: {}",
                database.path.display(),
                error
            )];
            if error.to_lowercase().contains("database is locked") {
                lines.push(format!(
                    "  Tip: close {} and try again, or use Firefox",
                    database.browser
                ));
            }
            lines
        }
        ExtractionEvent::Found(database) => vec![format!(
            "✓ Found ms_token in {}: {}",
            database.browser,
            database.path.display()
        )],
    }
}

/// Token Extraction Workflow
pub struct TokenWorkflow {
    extract_use_case: ExtractTokenUseCase<SqliteCookieRepository>,
    token_repository: Arc<FileTokenRepository>,
}

impl TokenWorkflow {
    /// 実行環境のホームディレクトリを探索するワークフロー
    pub fn new() -> Self {
        Self::with_locator(CookieProfileLocator::from_env())
    }

    /// 探索場所を指定して作成
    pub fn with_locator(locator: CookieProfileLocator) -> Self {
        let cookie_repo = Arc::new(SqliteCookieRepository::new(locator));

        Self {
            extract_use_case: ExtractTokenUseCase::new(cookie_repo),
            token_repository: Arc::new(FileTokenRepository::new()),
        }
    }

    /// Execute the extraction workflow
    ///
    /// # Errors
    ///
    /// どのブラウザにも msToken がない場合、または保存に失敗した場合にエラーを返す
    pub async fn execute(&self, args: TokenArgs) -> Result<()> {
        let to_stderr = args.stdout;
        status(to_stderr, "Extracting ms_token from browser cookies...");

        let observer = move |event: ExtractionEvent<'_>| {
            for line in describe_event(&event) {
                status(to_stderr, &line);
            }
        };

        let found = self
            .extract_use_case
            .execute(args.browser.map(Into::into), &observer)
            .await?;

        let Some(found) = found else {
            status(to_stderr, "✗ Could not find ms_token in any browser");
            status(to_stderr, "  Make sure you are logged into TikTok in your browser");
            status(to_stderr, "  If using Chrome/Edge, try closing the browser first");
            status(to_stderr, "  Or use Firefox for easier automatic extraction");
            bail!("Could not find ms_token in any browser");
        };

        if args.stdout {
            println!("{}", found.token.expose());
        } else {
            self.token_repository
                .save(&args.output, &found.token)
                .await?;
            status(
                to_stderr,
                &format!("✓ ms_token saved to: {}", args.output.display()),
            );
        }

        Ok(())
    }
}

impl Default for TokenWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
