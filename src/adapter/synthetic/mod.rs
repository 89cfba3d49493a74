//! # Synthetic Data Adapter
//!
//! `--mock` 用のTikTokRepository実装（ネットワークを使わずにランダムなデータを生成）

pub mod synthetic_repository;

pub use synthetic_repository::SyntheticTikTokRepository;
