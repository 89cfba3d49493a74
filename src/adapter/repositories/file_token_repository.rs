//! File Token Repository Implementation
//!
//! TokenRepositoryのファイル実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::SessionToken;
use crate::domain::error::SessionError;
use crate::domain::repositories::token_repository::TokenRepository;

/// ファイルシステムベースのトークンリポジトリ
pub struct FileTokenRepository;

impl FileTokenRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// ファイル名のように見える値か（存在しなければ値として使わずにエラーにする）
    fn looks_like_path(source: &str) -> bool {
        source.ends_with(".txt") || source.contains('/') || source.contains('\\')
    }

    fn resolve_sync(source: &str) -> Result<SessionToken> {
        let expanded = shellexpand::tilde(source).to_string();
        let path = Path::new(&expanded);

        if path.is_file() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read session file {}", path.display()))?;
            let token = SessionToken::new(&content)?;
            debug!("Loaded msToken {} from {}", token.redacted(), path.display());
            return Ok(token);
        }

        if Self::looks_like_path(source) {
            return Err(SessionError::FileNotFound(source.to_string()).into());
        }

        Ok(SessionToken::new(source)?)
    }

    fn save_sync(path: &Path, token: &SessionToken) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create token directory")?;
        }

        fs::write(path, token.expose())
            .with_context(|| format!("Failed to write token file {}", path.display()))?;

        info!("Saved msToken {} to {}", token.redacted(), path.display());
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for FileTokenRepository {
    async fn resolve(&self, source: &str) -> Result<SessionToken> {
        let source = source.to_string();
        tokio::task::spawn_blocking(move || Self::resolve_sync(&source))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn save(&self, path: &Path, token: &SessionToken) -> Result<()> {
        let path: PathBuf = path.to_path_buf();
        let token = token.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &token))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FileTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}
