//! # Domain Errors
//!
//! 型付きエラー定義

use thiserror::Error;

use crate::domain::entities::report::ScrapeMode;

/// オプションレコードの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("--target is required for {0} mode")]
    MissingTarget(ScrapeMode),

    #[error("--session is required (path to an ms_token file or the token value); use --mock to run without one")]
    MissingSession,

    #[error("could not read a video id from '{0}' (short links are not supported, use the full video URL)")]
    UnresolvableVideo(String),
}

/// セッショントークンのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session token is empty")]
    Empty,

    #[error("session token contains whitespace; check that the token file holds a single msToken value")]
    ContainsWhitespace,

    #[error("session file not found: {0}")]
    FileNotFound(String),
}
