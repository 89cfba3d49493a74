//! # Response Parsing
//!
//! TikTok Web API のレスポンスJSONをDomain層のエンティティに変換する

use serde_json::{Map, Value};

use super::client::HttpResponse;
use super::error::ApiError;
use crate::domain::entities::{Comment, Hashtag, Page, User, Video};

/// HTTPレスポンスをJSONとして検証する
///
/// 非2xx、空の本文、不正なJSON、非0の `statusCode` / `status_code` はエラー。
pub fn into_json(endpoint: &str, response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: response.status,
        });
    }

    if response.body.trim().is_empty() {
        return Err(ApiError::EmptyBody {
            endpoint: endpoint.to_string(),
        });
    }

    let value: Value =
        serde_json::from_str(&response.body).map_err(|source| ApiError::InvalidJson {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let code = ["statusCode", "status_code"]
        .iter()
        .find_map(|key| value.get(*key).and_then(as_i64))
        .unwrap_or(0);

    if code != 0 {
        let message = ["statusMsg", "status_msg"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .unwrap_or("")
            .to_string();
        return Err(ApiError::StatusCode {
            endpoint: endpoint.to_string(),
            code,
            message,
        });
    }

    Ok(value)
}

/// `/api/user/detail/`: `userInfo.user` に `userInfo.stats` を統合する
pub fn user_info(endpoint: &str, value: &Value) -> Result<User, ApiError> {
    let info = value.get("userInfo").ok_or_else(|| missing(endpoint, "userInfo"))?;
    let user = info
        .get("user")
        .and_then(Value::as_object)
        .ok_or_else(|| missing(endpoint, "userInfo.user"))?;

    Ok(User::new(merge_stats(user, info.get("stats"))))
}

/// `/api/post/item_list/` と `/api/challenge/item_list/`
pub fn video_page(value: &Value) -> Page<Video> {
    let videos = array(value, "itemList")
        .into_iter()
        .map(Video::new)
        .collect();

    Page::new(
        videos,
        flag(value, "hasMore"),
        value.get("cursor").and_then(as_i64).unwrap_or(0),
    )
}

/// `/api/recommend/item_list/`（カーソルは返されないので呼び出し側で進める）
pub fn recommend_page(value: &Value, previous_cursor: i64) -> Page<Video> {
    let videos: Vec<Video> = array(value, "itemList")
        .into_iter()
        .map(Video::new)
        .collect();
    let cursor = previous_cursor + videos.len() as i64;

    Page::new(videos, flag(value, "hasMore"), cursor)
}

/// `/api/user/list/`: `userList[].user` に `stats` を統合する
pub fn follower_page(value: &Value) -> Page<User> {
    let followers = array(value, "userList")
        .into_iter()
        .filter_map(|entry| {
            let user = entry.get("user").and_then(Value::as_object)?;
            Some(User::new(merge_stats(user, entry.get("stats"))))
        })
        .collect();

    Page::new(
        followers,
        flag(value, "hasMore"),
        value.get("minCursor").and_then(as_i64).unwrap_or(0),
    )
}

/// `/api/challenge/detail/`
pub fn hashtag_info(endpoint: &str, value: &Value) -> Result<Hashtag, ApiError> {
    value
        .pointer("/challengeInfo/challenge")
        .filter(|challenge| challenge.is_object())
        .cloned()
        .map(Hashtag::new)
        .ok_or_else(|| missing(endpoint, "challengeInfo.challenge"))
}

/// `/api/item/detail/`
pub fn video_info(endpoint: &str, value: &Value) -> Result<Video, ApiError> {
    value
        .pointer("/itemInfo/itemStruct")
        .filter(|item| item.is_object())
        .cloned()
        .map(Video::new)
        .ok_or_else(|| missing(endpoint, "itemInfo.itemStruct"))
}

/// `/api/comment/list/`
pub fn comment_page(value: &Value) -> Page<Comment> {
    let comments = array(value, "comments")
        .into_iter()
        .map(Comment::new)
        .collect();

    Page::new(
        comments,
        flag(value, "has_more"),
        value.get("cursor").and_then(as_i64).unwrap_or(0),
    )
}

fn missing(endpoint: &str, field: &'static str) -> ApiError {
    ApiError::MissingField {
        endpoint: endpoint.to_string(),
        field,
    }
}

/// 配列フィールドの要素（null や欠損は空）
fn array(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// `true` / `1` / `"1"` を真として扱う
fn flag(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(other) => as_i64(other).is_some_and(|n| n != 0),
        None => false,
    }
}

/// 数値または数字文字列
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// プロフィールに統計値を統合する（プロフィール側の値を優先）
fn merge_stats(user: &Map<String, Value>, stats: Option<&Value>) -> Value {
    let mut merged = user.clone();
    if let Some(Value::Object(stats)) = stats {
        for (key, value) in stats {
            merged.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
    Value::Object(merged)
}
