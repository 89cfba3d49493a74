//! # Browser Cookie Adapter
//!
//! CookieRepository の実装（ブラウザのプロファイル探索とSQLiteのCookieデータベース）

pub mod profiles;
pub mod sqlite_cookie_repository;

pub use profiles::{CookieProfileLocator, Platform};
pub use sqlite_cookie_repository::SqliteCookieRepository;
