//! # Data Transfer Objects
//!
//! Driver層からUse Caseへ渡すデータ

pub mod scrape_request;
