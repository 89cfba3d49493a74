//! TikTok API Errors

use thiserror::Error;

/// TikTok API のレスポンスに関するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("{endpoint} returned an empty response (request may have been blocked)")]
    EmptyBody { endpoint: String },

    #[error("{endpoint} returned status code {code}: {message}")]
    StatusCode {
        endpoint: String,
        code: i64,
        message: String,
    },

    #[error("{endpoint} response is missing {field}")]
    MissingField {
        endpoint: String,
        field: &'static str,
    },

    #[error("{endpoint} returned invalid JSON")]
    InvalidJson {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
