//! Repository Implementations
//!
//! Domain層のRepositoryトレイトのファイル実装

pub mod file_report_repository;
pub mod file_token_repository;

pub use file_report_repository::FileReportRepository;
pub use file_token_repository::FileTokenRepository;
