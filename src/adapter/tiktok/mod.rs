//! # TikTok Web API Adapter
//!
//! TikTokRepository の実装（TikTok Web API へのHTTPリクエスト）
//!
//! ## 構成要素
//!
//! - **client**: HTTPクライアント（ureq）
//! - **endpoints**: APIのURL組み立て
//! - **error**: APIエラー
//! - **response**: レスポンスJSONの解釈
//! - **web_repository**: TikTokRepository の実装

pub mod client;
pub mod endpoints;
pub mod error;
pub mod response;
pub mod web_repository;

pub use client::{HttpClient, HttpResponse, UreqHttpClient};
pub use endpoints::Endpoints;
pub use error::ApiError;
pub use web_repository::TikTokWebRepository;
