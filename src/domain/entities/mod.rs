//! # Domain Entities
//!
//! ドメインエンティティ定義

pub mod browser;
pub mod page;
pub mod record;
pub mod report;
pub mod session_token;
pub mod video_ref;

pub use browser::{Browser, CookieDatabase, CookieLookup};
pub use page::Page;
pub use record::{Comment, Hashtag, User, Video};
pub use report::{OutputFormat, ReportBody, ScrapeMode, ScrapeReport};
pub use session_token::SessionToken;
pub use video_ref::VideoRef;
