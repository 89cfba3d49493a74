//! # Domain Services
//!
//! エンティティにまたがるビジネスルール

pub mod file_naming;
pub mod tabulation;
