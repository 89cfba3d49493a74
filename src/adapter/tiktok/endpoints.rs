//! # Endpoints
//!
//! TikTok Web API のURL組み立て

use anyhow::{Context, Result};
use url::Url;

use crate::adapter::config::Config;
use crate::domain::entities::SessionToken;

pub const USER_DETAIL: &str = "/api/user/detail/";
pub const USER_POSTS: &str = "/api/post/item_list/";
pub const USER_FOLLOWERS: &str = "/api/user/list/";
pub const RECOMMEND: &str = "/api/recommend/item_list/";
pub const CHALLENGE_DETAIL: &str = "/api/challenge/detail/";
pub const CHALLENGE_ITEMS: &str = "/api/challenge/item_list/";
pub const ITEM_DETAIL: &str = "/api/item/detail/";
pub const COMMENTS: &str = "/api/comment/list/";

/// フォロワー一覧の scene パラメータ
const FOLLOWER_SCENE: &str = "67";

/// エンドポイントのURLビルダー
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    region: String,
    language: String,
    page_size: u32,
    user_agent: String,
    token: SessionToken,
}

impl Endpoints {
    /// 設定とセッショントークンから作成
    ///
    /// # Errors
    ///
    /// `base_url` がURLとして不正な場合にエラーを返す
    pub fn new(config: &Config, token: SessionToken) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base_url: {}", config.base_url))?;

        Ok(Self {
            base,
            region: config.region.clone(),
            language: config.language.clone(),
            page_size: config.page_size,
            user_agent: config.user_agent.clone(),
            token,
        })
    }

    pub fn user_detail(&self, username: &str) -> Url {
        self.build(USER_DETAIL, &[("uniqueId", username.to_string())])
    }

    pub fn user_posts(&self, sec_uid: &str, cursor: i64) -> Url {
        self.build(
            USER_POSTS,
            &[
                ("secUid", sec_uid.to_string()),
                ("cursor", cursor.to_string()),
                ("count", self.page_size.to_string()),
            ],
        )
    }

    pub fn user_followers(&self, sec_uid: &str, min_cursor: i64) -> Url {
        self.build(
            USER_FOLLOWERS,
            &[
                ("secUid", sec_uid.to_string()),
                ("minCursor", min_cursor.to_string()),
                ("maxCursor", "0".to_string()),
                ("scene", FOLLOWER_SCENE.to_string()),
                ("count", self.page_size.to_string()),
            ],
        )
    }

    pub fn recommend(&self) -> Url {
        self.build(
            RECOMMEND,
            &[
                ("from_page", "fyp".to_string()),
                ("count", self.page_size.to_string()),
            ],
        )
    }

    pub fn challenge_detail(&self, name: &str) -> Url {
        self.build(CHALLENGE_DETAIL, &[("challengeName", name.to_string())])
    }

    pub fn challenge_items(&self, challenge_id: &str, cursor: i64) -> Url {
        self.build(
            CHALLENGE_ITEMS,
            &[
                ("challengeID", challenge_id.to_string()),
                ("cursor", cursor.to_string()),
                ("count", self.page_size.to_string()),
            ],
        )
    }

    pub fn item_detail(&self, video_id: &str) -> Url {
        self.build(ITEM_DETAIL, &[("itemId", video_id.to_string())])
    }

    pub fn comments(&self, video_id: &str, cursor: i64) -> Url {
        self.build(
            COMMENTS,
            &[
                ("aweme_id", video_id.to_string()),
                ("cursor", cursor.to_string()),
                ("count", self.page_size.to_string()),
            ],
        )
    }

    /// 全リクエスト共通のヘッダー（msToken はCookieでも送る）
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            (
                "Referer".to_string(),
                format!("{}/", self.base.as_str().trim_end_matches('/')),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Cookie".to_string(),
                format!("msToken={}", self.token.expose()),
            ),
        ]
    }

    fn build(&self, path: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.query_pairs_mut()
            .clear()
            .append_pair("aid", "1988")
            .append_pair("app_name", "tiktok_web")
            .append_pair("device_platform", "web_pc")
            .append_pair("region", &self.region)
            .append_pair("app_language", &self.language)
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("msToken", self.token.expose());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        let config = Config::default();
        Endpoints::new(&config, SessionToken::new("tok+en/1").unwrap()).unwrap()
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_common_parameters() {
        let url = endpoints().user_detail("alice");

        assert_eq!(url.path(), USER_DETAIL);
        assert_eq!(url.host_str(), Some("www.tiktok.com"));
        assert_eq!(param(&url, "aid").as_deref(), Some("1988"));
        assert_eq!(param(&url, "app_name").as_deref(), Some("tiktok_web"));
        assert_eq!(param(&url, "region").as_deref(), Some("US"));
        assert_eq!(param(&url, "app_language").as_deref(), Some("en"));
        assert_eq!(param(&url, "uniqueId").as_deref(), Some("alice"));
        assert_eq!(param(&url, "msToken").as_deref(), Some("tok+en/1"));
    }

    #[test]
    fn test_followers_use_min_cursor_and_scene() {
        let url = endpoints().user_followers("MS4w", 1700000000);

        assert_eq!(url.path(), USER_FOLLOWERS);
        assert_eq!(param(&url, "secUid").as_deref(), Some("MS4w"));
        assert_eq!(param(&url, "minCursor").as_deref(), Some("1700000000"));
        assert_eq!(param(&url, "scene").as_deref(), Some("67"));
        assert_eq!(param(&url, "count").as_deref(), Some("30"));
    }

    #[test]
    fn test_comment_parameters() {
        let url = endpoints().comments("7301", 20);
        assert_eq!(param(&url, "aweme_id").as_deref(), Some("7301"));
        assert_eq!(param(&url, "cursor").as_deref(), Some("20"));
    }

    #[test]
    fn test_custom_base_url() {
        let config = Config {
            base_url: "http://127.0.0.1:8080".to_string(),
            ..Config::default()
        };
        let endpoints = Endpoints::new(&config, SessionToken::new("t").unwrap()).unwrap();
        let url = endpoints.recommend();
        assert_eq!(url.as_str().split('?').next(), Some("http://127.0.0.1:8080/api/recommend/item_list/"));
        assert_eq!(param(&url, "from_page").as_deref(), Some("fyp"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(Endpoints::new(&config, SessionToken::new("t").unwrap()).is_err());
    }

    #[test]
    fn test_headers_carry_cookie() {
        let headers = endpoints().headers();
        assert!(headers
            .iter()
            .any(|(k, v)| k == "Cookie" && v == "msToken=tok+en/1"));
        assert!(headers
            .iter()
            .any(|(k, v)| k == "Referer" && v == "https://www.tiktok.com/"));
    }
}
