//! # TikTok Records
//!
//! APIが返すレコード（ユーザー、動画、コメント、ハッシュタグ）のラッパー
//!
//! レコードの形はTikTok側が所有しているため、JSONオブジェクトをそのまま保持し、
//! CSV出力やページングに必要なフィールドだけをアクセサで公開する。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSONポインタで値を取り出し、CSVセル用の文字列に変換する
///
/// 文字列はそのまま、数値と真偽値は `to_string`、null や欠損は空文字列
fn cell_at(value: &Value, pointer: &str) -> String {
    match value.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// JSONポインタで整数を取り出す（数値でも数字文字列でも可）
fn u64_at(value: &Value, pointer: &str) -> Option<u64> {
    match value.pointer(pointer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

macro_rules! record_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// JSONオブジェクトから作成
            pub fn new(value: Value) -> Self {
                Self(value)
            }

            /// JSONポインタで指定したフィールドをCSVセル文字列として取得
            pub fn field(&self, pointer: &str) -> String {
                cell_at(&self.0, pointer)
            }

            /// `id` フィールド（数値IDも文字列化）
            pub fn id(&self) -> String {
                self.field("/id")
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

record_type!(
    /// ユーザープロフィール（フォロワー一覧の要素にも使用）
    User
);

record_type!(
    /// 動画
    Video
);

record_type!(
    /// 動画へのコメント
    Comment
);

record_type!(
    /// ハッシュタグ（challenge）
    Hashtag
);

impl User {
    pub fn unique_id(&self) -> String {
        self.field("/uniqueId")
    }

    pub fn nickname(&self) -> String {
        self.field("/nickname")
    }

    /// フォロワー一覧やその他のAPI呼び出しに必要な secUid
    pub fn sec_uid(&self) -> Option<String> {
        match self.0.get("secUid") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn follower_count(&self) -> Option<u64> {
        u64_at(&self.0, "/followerCount")
    }

    pub fn following_count(&self) -> Option<u64> {
        u64_at(&self.0, "/followingCount")
    }

    pub fn video_count(&self) -> Option<u64> {
        u64_at(&self.0, "/videoCount")
    }
}

impl Video {
    pub fn description(&self) -> String {
        self.field("/desc")
    }

    pub fn author_unique_id(&self) -> String {
        self.field("/author/uniqueId")
    }

    pub fn create_time(&self) -> String {
        self.field("/createTime")
    }

    /// `stats` 配下の統計値（diggCount, shareCount, commentCount, playCount）
    pub fn stat(&self, name: &str) -> String {
        self.field(&format!("/stats/{}", name))
    }

    pub fn play_count(&self) -> Option<u64> {
        u64_at(&self.0, "/stats/playCount")
    }

    pub fn digg_count(&self) -> Option<u64> {
        u64_at(&self.0, "/stats/diggCount")
    }

}

impl Comment {
    /// コメントID（Web APIは `cid`、モックデータは `id` を使う）
    pub fn comment_id(&self) -> String {
        let id = self.id();
        if id.is_empty() {
            self.field("/cid")
        } else {
            id
        }
    }

    pub fn text(&self) -> String {
        self.field("/text")
    }

    /// コメント投稿者（Comment APIの `user` は snake_case の `unique_id`）
    pub fn author_unique_id(&self) -> String {
        let camel = self.field("/user/uniqueId");
        if camel.is_empty() {
            self.field("/user/unique_id")
        } else {
            camel
        }
    }

    pub fn digg_count(&self) -> String {
        let camel = self.field("/diggCount");
        if camel.is_empty() {
            self.field("/digg_count")
        } else {
            camel
        }
    }

    pub fn create_time(&self) -> String {
        // Comment APIは snake_case の create_time を返すことがある
        let camel = self.field("/createTime");
        if camel.is_empty() {
            self.field("/create_time")
        } else {
            camel
        }
    }
}

impl Hashtag {
    pub fn title(&self) -> String {
        self.field("/title")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_accessors() {
        let user = User::new(json!({
            "uniqueId": "alice",
            "nickname": "Alice",
            "secUid": "MS4wLjABAAAA",
            "followerCount": 1200,
            "followingCount": "35",
            "videoCount": 10
        }));

        assert_eq!(user.unique_id(), "alice");
        assert_eq!(user.nickname(), "Alice");
        assert_eq!(user.sec_uid().as_deref(), Some("MS4wLjABAAAA"));
        assert_eq!(user.follower_count(), Some(1200));
        assert_eq!(user.following_count(), Some(35));
        assert_eq!(user.video_count(), Some(10));
    }

    #[test]
    fn test_user_missing_sec_uid() {
        let user = User::new(json!({ "uniqueId": "bob", "secUid": "" }));
        assert!(user.sec_uid().is_none());
    }

    #[test]
    fn test_video_fields_render_numbers_and_strings() {
        let video = Video::new(json!({
            "id": "7300000000000000001",
            "desc": "dance #fyp",
            "createTime": 1700000000,
            "author": { "uniqueId": "alice" },
            "stats": { "diggCount": 10, "playCount": "999" }
        }));

        assert_eq!(video.id(), "7300000000000000001");
        assert_eq!(video.create_time(), "1700000000");
        assert_eq!(video.author_unique_id(), "alice");
        assert_eq!(video.stat("diggCount"), "10");
        assert_eq!(video.play_count(), Some(999));
        assert_eq!(video.stat("shareCount"), "");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let comment = Comment::new(json!({ "id": 42, "text": "hi" }));
        assert_eq!(comment.id(), "42");
    }

    #[test]
    fn test_comment_create_time_fallback() {
        let comment = Comment::new(json!({
            "cid": "1",
            "create_time": 1700000001,
            "digg_count": 3
        }));
        assert_eq!(comment.create_time(), "1700000001");
        assert_eq!(comment.comment_id(), "1");
        assert_eq!(comment.digg_count(), "3");
    }

    #[test]
    fn test_comment_author_snake_case() {
        let comment = Comment::new(json!({
            "cid": "1",
            "user": { "unique_id": "bob", "nickname": "Bob" }
        }));
        assert_eq!(comment.author_unique_id(), "bob");

        let mock = Comment::new(json!({ "id": "2", "user": { "uniqueId": "carol" } }));
        assert_eq!(mock.author_unique_id(), "carol");
    }

    #[test]
    fn test_transparent_serialization() {
        let raw = json!({ "id": "1", "desc": "日本語" });
        let video = Video::new(raw.clone());
        let serialized = serde_json::to_value(&video).unwrap();
        assert_eq!(serialized, raw);
    }
}
