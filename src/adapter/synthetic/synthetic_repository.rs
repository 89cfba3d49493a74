//! # Synthetic TikTok Repository
//!
//! API と同じ形のレコードをランダムに生成する

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Comment, Hashtag, Page, User, Video, VideoRef};
use crate::domain::repositories::tiktok_repository::TikTokRepository;

/// 生成する動画・コメントIDの範囲（19桁）
pub const VIDEO_ID_RANGE: std::ops::RangeInclusive<u64> =
    7_000_000_000_000_000_000..=7_999_999_999_999_999_999;

const DAY_SECS: i64 = 86_400;

const TRENDING_AUTHORS: [&str; 5] = ["user1", "creator2", "tiktoker3", "viral4", "famous5"];

/// モックデータを生成するリポジトリ
pub struct SyntheticTikTokRepository {
    rng: Mutex<StdRng>,
    page_size: usize,
}

impl SyntheticTikTokRepository {
    /// ランダムなシードで作成
    pub fn new(page_size: usize) -> Self {
        Self::from_rng(StdRng::from_entropy(), page_size)
    }

    /// シードを固定して作成（テスト用に再現可能）
    pub fn with_seed(seed: u64, page_size: usize) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), page_size)
    }

    fn from_rng(rng: StdRng, page_size: usize) -> Self {
        Self {
            rng: Mutex::new(rng),
            page_size: page_size.max(1),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // 生成処理はパニックしないので、毒化していても状態は使える
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// `cursor` から始まる1ページ分を生成する
    ///
    /// `total` が指定されていれば、その件数に達した時点で最終ページになる
    fn page<T>(
        &self,
        cursor: i64,
        total: Option<u64>,
        mut generate: impl FnMut(&mut StdRng, usize) -> T,
    ) -> Page<T> {
        let start = cursor.max(0) as u64;
        let end = match total {
            Some(total) => total.min(start + self.page_size as u64),
            None => start + self.page_size as u64,
        };

        let mut rng = self.rng();
        let items: Vec<T> = (start..end)
            .map(|index| generate(&mut rng, index as usize))
            .collect();

        let has_more = total.map_or(true, |total| end < total);
        Page::new(items, has_more, end as i64)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ago(rng: &mut StdRng, max_days: i64) -> i64 {
    Local::now().timestamp() - rng.gen_range(0..=DAY_SECS * max_days)
}

fn profile(rng: &mut StdRng, username: &str) -> Value {
    json!({
        "id": rng.gen_range(1_000_000_000_000_000_000u64..=9_999_999_999_999_999_999).to_string(),
        "uniqueId": username,
        "nickname": format!("{} User", capitalize(username)),
        "secUid": format!("MS4wLjABAAAA{}", username),
        "followerCount": rng.gen_range(1_000..=50_000_000u64),
        "followingCount": rng.gen_range(50..=5_000u64),
        "videoCount": rng.gen_range(10..=5_000u64),
        "verified": rng.gen_bool(0.5),
        "privateAccount": rng.gen_bool(0.5),
        "bioDescription": format!("Mock bio for {}", username),
        "avatarLarger": format!("https://example.com/avatars/{}.jpg", username),
        "avatarMedium": format!("https://example.com/avatars/{}_medium.jpg", username),
        "avatarThumb": format!("https://example.com/avatars/{}_thumb.jpg", username),
    })
}

fn video(rng: &mut StdRng, index: usize, username: &str) -> Value {
    let id = rng.gen_range(VIDEO_ID_RANGE);
    json!({
        "id": id.to_string(),
        "desc": format!("Mock video description {} - This is a test video for {}", index + 1, username),
        "createTime": ago(rng, 365),
        "author": {
            "uniqueId": username,
            "nickname": format!("{} User", capitalize(username)),
        },
        "stats": {
            "diggCount": rng.gen_range(100..=10_000_000u64),
            "shareCount": rng.gen_range(10..=1_000_000u64),
            "commentCount": rng.gen_range(5..=500_000u64),
            "playCount": rng.gen_range(1_000..=100_000_000u64),
        },
        "video": {
            "downloadAddr": format!("https://example.com/videos/{}.mp4", id),
            "cover": format!("https://example.com/covers/{}.jpg", id),
            "duration": rng.gen_range(5..=60u32),
        },
        "music": {
            "title": format!("Mock Music {}", index + 1),
            "authorName": "Mock Artist",
        },
        "textExtra": [],
    })
}

fn follower(rng: &mut StdRng) -> Value {
    let candidates = [
        format!("user{}", rng.gen_range(1..=999)),
        format!("creator{}", rng.gen_range(1..=99)),
        format!("tiktoker{}", rng.gen_range(1..=99)),
        format!("fan{}", rng.gen_range(1..=99)),
        format!("viewer{}", rng.gen_range(1..=99)),
    ];
    let username = candidates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "user1".to_string());

    json!({
        "id": rng.gen_range(1_000_000_000_000_000_000u64..=9_999_999_999_999_999_999).to_string(),
        "uniqueId": username,
        "nickname": format!("{} User", capitalize(&username)),
        "followerCount": rng.gen_range(10..=500_000u64),
        "followingCount": rng.gen_range(5..=2_000u64),
        "videoCount": rng.gen_range(0..=1_000u64),
        "verified": rng.gen_bool(0.5),
        "privateAccount": rng.gen_bool(0.5),
        "bioDescription": format!("Mock bio for {}", username),
        "avatarLarger": format!("https://example.com/avatars/{}.jpg", username),
    })
}

fn comment(rng: &mut StdRng, index: usize) -> Value {
    json!({
        "id": rng.gen_range(VIDEO_ID_RANGE).to_string(),
        "text": format!("Mock comment {} - This is a test comment", index + 1),
        "createTime": ago(rng, 30),
        "diggCount": rng.gen_range(0..=10_000u64),
        "user": {
            "uniqueId": format!("user{}", rng.gen_range(1..=1_000)),
            "nickname": format!("Commenter {}", index + 1),
        },
    })
}

#[async_trait]
impl TikTokRepository for SyntheticTikTokRepository {
    async fn user_info(&self, username: &str) -> Result<User> {
        Ok(User::new(profile(&mut self.rng(), username)))
    }

    async fn user_videos_page(&self, user: &User, cursor: i64) -> Result<Page<Video>> {
        let username = user.unique_id();
        Ok(self.page(cursor, user.video_count(), |rng, index| {
            Video::new(video(rng, index, &username))
        }))
    }

    async fn user_followers_page(&self, user: &User, cursor: i64) -> Result<Page<User>> {
        Ok(self.page(cursor, user.follower_count(), |rng, _| {
            User::new(follower(rng))
        }))
    }

    async fn trending_page(&self, cursor: i64) -> Result<Page<Video>> {
        Ok(self.page(cursor, None, |rng, index| {
            let author = TRENDING_AUTHORS.choose(rng).copied().unwrap_or("user1");
            Video::new(video(rng, index, author))
        }))
    }

    async fn hashtag_info(&self, name: &str) -> Result<Hashtag> {
        let id = self.rng().gen_range(1_000_000..=9_999_999u64);
        Ok(Hashtag::new(json!({
            "id": id.to_string(),
            "title": name,
            "desc": format!("Mock hashtag #{}", name),
        })))
    }

    async fn hashtag_videos_page(&self, hashtag: &Hashtag, cursor: i64) -> Result<Page<Video>> {
        let tag = hashtag.title();
        Ok(self.page(cursor, None, |rng, index| {
            let author = format!("user{}", rng.gen_range(1..=9));
            let mut value = video(rng, index, &author);
            let desc = format!("#{} {}", tag, value["desc"].as_str().unwrap_or_default());
            value["desc"] = Value::String(desc);
            Video::new(value)
        }))
    }

    async fn video_info(&self, video_ref: &VideoRef) -> Result<Video> {
        let mut rng = self.rng();
        let id = video_ref
            .video_id()
            .unwrap_or_else(|| rng.gen_range(VIDEO_ID_RANGE).to_string());

        Ok(Video::new(json!({
            "id": id,
            "desc": format!("Mock video description for {}", id),
            "createTime": ago(&mut rng, 30),
            "author": {
                "uniqueId": "mockuser",
                "nickname": "Mock User",
            },
            "stats": {
                "diggCount": rng.gen_range(1_000..=5_000_000u64),
                "shareCount": rng.gen_range(100..=500_000u64),
                "commentCount": rng.gen_range(50..=100_000u64),
                "playCount": rng.gen_range(10_000..=10_000_000u64),
            },
            "video": {
                "downloadAddr": format!("https://example.com/videos/{}.mp4", id),
                "cover": format!("https://example.com/covers/{}.jpg", id),
                "duration": rng.gen_range(10..=60u32),
            },
        })))
    }

    async fn video_comments_page(&self, _video_id: &str, cursor: i64) -> Result<Page<Comment>> {
        Ok(self.page(cursor, None, |rng, index| Comment::new(comment(rng, index))))
    }
}
