//! # Token Repository Trait
//!
//! msToken の読み込みと保存を抽象化

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::SessionToken;

/// トークンリポジトリ
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// `--session` の値からトークンを解決する
    ///
    /// 値が既存ファイルのパスならその内容を、そうでなければ値そのものをトークンとする。
    ///
    /// # Errors
    ///
    /// ファイルの読み込みに失敗した場合、またはトークンが不正な場合にエラーを返す
    async fn resolve(&self, source: &str) -> Result<SessionToken>;

    /// トークンをファイルに保存する
    async fn save(&self, path: &Path, token: &SessionToken) -> Result<()>;
}
