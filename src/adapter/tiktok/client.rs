//! # HTTP Client
//!
//! TikTok Web API へのGETリクエスト（同期処理）
//!
//! 呼び出し側は `tokio::task::spawn_blocking` の中で使う。

use anyhow::{Context, Result};
use log::debug;
use std::time::Duration;
use url::Url;

#[cfg(test)]
use mockall::automock;

/// HTTPレスポンス（ステータスと本文のみ）
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTPクライアントのtrait
///
/// 非2xxのステータスもエラーにせず `HttpResponse` として返す。
#[cfg_attr(test, automock)]
pub trait HttpClient: Send + Sync + 'static {
    /// GETリクエストを送る
    ///
    /// # Arguments
    ///
    /// * `url` - クエリパラメータを含むURL
    /// * `headers` - 追加のリクエストヘッダー
    fn get(&self, url: &Url, headers: &[(String, String)]) -> Result<HttpResponse>;
}

/// ureq による実装
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    ///
    /// * `timeout` - リクエスト全体のタイムアウト
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self { agent }
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &Url, headers: &[(String, String)]) -> Result<HttpResponse> {
        debug!("GET {}{}", url.origin().ascii_serialization(), url.path());

        let mut request = self.agent.get(url.as_str());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let mut response = request
            .call()
            .with_context(|| format!("HTTP request to {} failed", url.path()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response body from {}", url.path()))?;

        Ok(HttpResponse { status, body })
    }
}
