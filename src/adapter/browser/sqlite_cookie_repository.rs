//! # SQLite Cookie Repository
//!
//! CookieRepository のSQLite実装
//!
//! データベースは `immutable=1` の読み取り専用URIで開くため、ブラウザ起動中でもロックを取らない。

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

use super::profiles::CookieProfileLocator;
use crate::domain::entities::{Browser, CookieDatabase, CookieLookup};
use crate::domain::repositories::cookie_repository::CookieRepository;

/// 探すCookie名（TikTokは `msToken` を使う）
const TOKEN_NAMES: [&str; 2] = ["msToken", "ms_token"];

const FIREFOX_TOKEN_QUERIES: [&str; 3] = [
    "SELECT value FROM moz_cookies WHERE name = ?1 \
     AND baseDomain IN ('tiktok.com', '.tiktok.com') ORDER BY lastAccessed DESC",
    "SELECT value FROM moz_cookies WHERE name = ?1 \
     AND (host IN ('tiktok.com', '.tiktok.com', 'www.tiktok.com') OR host LIKE '%.tiktok.com') \
     ORDER BY lastAccessed DESC",
    "SELECT value FROM moz_cookies WHERE name = ?1 AND host LIKE '%tiktok%' \
     ORDER BY lastAccessed DESC",
];

const FIREFOX_COUNT_QUERIES: [&str; 3] = [
    "SELECT COUNT(*) FROM moz_cookies WHERE baseDomain IN ('tiktok.com', '.tiktok.com')",
    "SELECT COUNT(*) FROM moz_cookies WHERE host LIKE '%tiktok.com'",
    "SELECT COUNT(*) FROM moz_cookies WHERE host LIKE '%tiktok%'",
];

const CHROMIUM_TOKEN_QUERIES: [&str; 2] = [
    "SELECT value FROM cookies WHERE name = ?1 AND host_key LIKE '%tiktok.com' \
     ORDER BY last_access_utc DESC",
    "SELECT value FROM cookies WHERE name = ?1 AND host_key LIKE '%tiktok%' \
     ORDER BY last_access_utc DESC",
];

const CHROMIUM_COUNT_QUERIES: [&str; 2] = [
    "SELECT COUNT(*) FROM cookies WHERE host_key LIKE '%tiktok.com'",
    "SELECT COUNT(*) FROM cookies WHERE host_key LIKE '%tiktok%'",
];

/// 値が空で `encrypted_value` だけが入っている msToken の件数
const CHROMIUM_ENCRYPTED_QUERY: &str = "SELECT COUNT(*) FROM cookies \
     WHERE name IN ('msToken', 'ms_token') AND host_key LIKE '%tiktok%' \
     AND (value IS NULL OR value = '') AND length(encrypted_value) > 0";

/// Cookieの値の解釈
#[derive(Debug, Clone, PartialEq)]
enum CookieValue {
    Plain(String),
    Encrypted,
    Empty,
}

/// カラムの値を解釈する
///
/// Chromium系の暗号化済みの値は `v10` / `v11` で始まる
fn decode_value(value: ValueRef<'_>) -> CookieValue {
    let text = match value {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => text.trim().to_string(),
            Err(_) => return CookieValue::Encrypted,
        },
        _ => return CookieValue::Empty,
    };

    if text.is_empty() {
        CookieValue::Empty
    } else if text.starts_with("v1") {
        CookieValue::Encrypted
    } else {
        CookieValue::Plain(text)
    }
}

/// SQLite の読み取り専用URI（`?` `#` `%` はエスケープする）
fn immutable_uri(path: &Path) -> String {
    let mut escaped = String::new();
    for c in path.to_string_lossy().chars() {
        match c {
            '?' => escaped.push_str("%3f"),
            '#' => escaped.push_str("%23"),
            '%' => escaped.push_str("%25"),
            '\\' => escaped.push('/'),
            _ => escaped.push(c),
        }
    }
    format!("file:{}?immutable=1", escaped)
}

/// ブラウザのCookieデータベースを読むリポジトリ
pub struct SqliteCookieRepository {
    locator: CookieProfileLocator,
}

impl SqliteCookieRepository {
    /// 新しいリポジトリを作成
    pub fn new(locator: CookieProfileLocator) -> Self {
        Self { locator }
    }

    /// データベースを読み取り専用で開く
    fn open(path: &Path) -> Result<Connection> {
        Connection::open_with_flags(
            immutable_uri(path),
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open cookie database {}", path.display()))
    }

    /// 最初に成功したクエリの件数（全て失敗したら0）
    fn first_count(conn: &Connection, queries: &[&str]) -> u64 {
        for query in queries {
            match conn.query_row(query, [], |row| row.get::<_, i64>(0)) {
                Ok(count) => return count.max(0) as u64,
                Err(e) => debug!("Count query failed: {}", e),
            }
        }
        0
    }

    fn count_tiktok_cookies_sync(database: &CookieDatabase) -> Result<u64> {
        let conn = Self::open(&database.path)?;
        let queries: &[&str] = if database.browser.is_chromium() {
            &CHROMIUM_COUNT_QUERIES
        } else {
            &FIREFOX_COUNT_QUERIES
        };
        Ok(Self::first_count(&conn, queries))
    }

    fn lookup_sync(database: &CookieDatabase) -> Result<CookieLookup> {
        let conn = Self::open(&database.path)?;
        let queries: &[&str] = if database.browser.is_chromium() {
            &CHROMIUM_TOKEN_QUERIES
        } else {
            &FIREFOX_TOKEN_QUERIES
        };

        let mut saw_encrypted = false;
        for name in TOKEN_NAMES {
            for query in queries {
                let value = conn
                    .query_row(query, [name], |row| row.get_ref(0).map(decode_value))
                    .optional();

                match value {
                    Ok(Some(CookieValue::Plain(token))) => {
                        debug!("Found {} in {}", name, database.path.display());
                        return Ok(CookieLookup::Found(token));
                    }
                    Ok(Some(CookieValue::Encrypted)) => saw_encrypted = true,
                    Ok(Some(CookieValue::Empty)) | Ok(None) => {}
                    Err(e) => debug!("Cookie query failed on {}: {}", database.path.display(), e),
                }
            }
        }

        if database.browser.is_chromium()
            && !saw_encrypted
            && Self::first_count(&conn, &[CHROMIUM_ENCRYPTED_QUERY]) > 0
        {
            saw_encrypted = true;
        }

        if saw_encrypted {
            warn!("msToken in {} is encrypted", database.path.display());
            return Ok(CookieLookup::Encrypted);
        }

        let count_queries: &[&str] = if database.browser.is_chromium() {
            &CHROMIUM_COUNT_QUERIES
        } else {
            &FIREFOX_COUNT_QUERIES
        };
        Ok(CookieLookup::Missing {
            tiktok_cookies: Self::first_count(&conn, count_queries),
        })
    }
}

#[async_trait]
impl CookieRepository for SqliteCookieRepository {
    async fn discover(&self, browser: Browser) -> Result<Vec<CookieDatabase>> {
        let locator = self.locator.clone();
        let paths = tokio::task::spawn_blocking(move || locator.locate(browser))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?;

        debug!("Found {} {} cookie databases", paths.len(), browser);
        Ok(paths
            .into_iter()
            .map(|path| CookieDatabase::new(browser, path))
            .collect())
    }

    async fn has_tiktok_cookies(&self, database: &CookieDatabase) -> bool {
        let database = database.clone();
        let count =
            tokio::task::spawn_blocking(move || Self::count_tiktok_cookies_sync(&database)).await;

        match count {
            Ok(Ok(count)) => count > 0,
            Ok(Err(e)) => {
                debug!("Skipping unreadable cookie database: {:#}", e);
                false
            }
            Err(e) => {
                debug!("Failed to spawn blocking task: {}", e);
                false
            }
        }
    }

    async fn lookup_ms_token(&self, database: &CookieDatabase) -> Result<CookieLookup> {
        let database = database.clone();
        tokio::task::spawn_blocking(move || Self::lookup_sync(&database))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
