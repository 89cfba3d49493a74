//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli** / **workflow**: `tiktok-scraper`
//! - **token_cli** / **token_workflow**: `extract_ms_token`

pub mod cli;
pub mod token_cli;
pub mod token_workflow;
pub mod workflow;

pub use cli::Args;
pub use token_cli::TokenArgs;
pub use token_workflow::TokenWorkflow;
pub use workflow::ScrapeWorkflow;
