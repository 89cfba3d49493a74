//! Token Extractor CLI
//!
//! `extract_ms_token` の引数解析

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::domain::entities::Browser;

/// 探索するブラウザ
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliBrowser {
    Firefox,
    Chrome,
    Edge,
}

impl From<CliBrowser> for Browser {
    fn from(browser: CliBrowser) -> Self {
        match browser {
            CliBrowser::Firefox => Browser::Firefox,
            CliBrowser::Chrome => Browser::Chrome,
            CliBrowser::Edge => Browser::Edge,
        }
    }
}

/// ブラウザのCookieから msToken を取り出すCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "extract_ms_token")]
#[command(about = "Extract TikTok ms_token from browser cookies", long_about = None)]
pub struct TokenArgs {
    /// Preferred browser (default: try Firefox, Chrome, then Edge)
    #[arg(short, long, value_enum)]
    pub browser: Option<CliBrowser>,

    /// Output file path
    #[arg(short, long, default_value = "ms_token.txt")]
    pub output: PathBuf,

    /// Print ms_token to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}
