//! Token Extraction Integration Tests
//!
//! 一時ディレクトリに作ったブラウザプロファイルから msToken を取り出す

use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use tiktok_scraper::adapter::browser::{CookieProfileLocator, Platform, SqliteCookieRepository};
use tiktok_scraper::application::use_cases::extract_token::{ExtractTokenUseCase, ExtractionEvent};
use tiktok_scraper::domain::entities::Browser;
use tiktok_scraper::driver::token_cli::TokenArgs;
use tiktok_scraper::driver::token_workflow::TokenWorkflow;

fn ignore(_event: ExtractionEvent<'_>) {}

/// `moz_cookies` テーブルを持つFirefoxのCookieデータベースを作る
fn firefox_profile(home: &Path, profile: &str, cookies: &[(&str, &str, &str, i64)]) -> PathBuf {
    let dir = home.join(".mozilla/firefox").join(profile);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cookies.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE moz_cookies (
            id INTEGER PRIMARY KEY,
            host TEXT,
            name TEXT,
            value TEXT,
            lastAccessed INTEGER
        )",
    )
    .unwrap();
    for (host, name, value, accessed) in cookies {
        conn.execute(
            "INSERT INTO moz_cookies (host, name, value, lastAccessed) VALUES (?1, ?2, ?3, ?4)",
            params![host, name, value, accessed],
        )
        .unwrap();
    }
    path
}

/// `cookies` テーブルを持つChromeのCookieデータベースを作る
fn chrome_profile(home: &Path, profile: &str, cookies: &[(&str, &str, &str, &[u8])]) -> PathBuf {
    let dir = home.join(".config/google-chrome").join(profile);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("Cookies");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE cookies (
            host_key TEXT,
            name TEXT,
            value TEXT,
            encrypted_value BLOB,
            last_access_utc INTEGER
        )",
    )
    .unwrap();
    for (host, name, value, encrypted) in cookies {
        conn.execute(
            "INSERT INTO cookies (host_key, name, value, encrypted_value, last_access_utc)
             VALUES (?1, ?2, ?3, ?4, 1)",
            params![host, name, value, encrypted],
        )
        .unwrap();
    }
    path
}

fn use_case(home: &Path) -> ExtractTokenUseCase<SqliteCookieRepository> {
    let locator = CookieProfileLocator::new(home, Platform::Linux);
    ExtractTokenUseCase::new(Arc::new(SqliteCookieRepository::new(locator)))
}

#[tokio::test]
async fn test_firefox_token_is_found_by_host() {
    let home = TempDir::new().unwrap();
    let path = firefox_profile(
        home.path(),
        "abcd.default-release",
        &[
            (".tiktok.com", "msToken", "older-token", 100),
            (".tiktok.com", "msToken", "newest-token", 200),
            (".example.com", "msToken", "not-tiktok", 300),
        ],
    );

    let found = use_case(home.path())
        .execute(None, &ignore)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.token.expose(), "newest-token");
    assert_eq!(found.source.browser, Browser::Firefox);
    assert_eq!(found.source.path, path);
}

#[tokio::test]
async fn test_profile_with_tiktok_cookies_is_checked_first() {
    let home = TempDir::new().unwrap();
    firefox_profile(
        home.path(),
        "a-empty",
        &[(".example.com", "session", "x", 1)],
    );
    let tiktok = firefox_profile(
        home.path(),
        "b-tiktok",
        &[(".tiktok.com", "ms_token", "legacy-name-token", 1)],
    );

    let found = use_case(home.path())
        .execute(Some(Browser::Firefox), &ignore)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.token.expose(), "legacy-name-token");
    assert_eq!(found.source.path, tiktok);
}

#[tokio::test]
async fn test_chrome_plain_value_after_empty_firefox() {
    let home = TempDir::new().unwrap();
    firefox_profile(
        home.path(),
        "p1",
        &[(".tiktok.com", "tt_csrf_token", "abc", 1)],
    );
    chrome_profile(
        home.path(),
        "Default",
        &[(".tiktok.com", "msToken", "chrome-plain-token", b"")],
    );

    let events = std::sync::Mutex::new(Vec::new());
    let observer = |event: ExtractionEvent<'_>| {
        let label = match event {
            ExtractionEvent::NoToken { tiktok_cookies, .. } => format!("no-token:{}", tiktok_cookies),
            ExtractionEvent::Found(database) => format!("found:{}", database.browser),
            _ => return,
        };
        events.lock().unwrap().push(label);
    };

    let found = use_case(home.path())
        .execute(None, &observer)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.token.expose(), "chrome-plain-token");
    assert_eq!(
        *events.lock().unwrap(),
        vec!["no-token:1".to_string(), "found:Chrome".to_string()]
    );
}

#[tokio::test]
async fn test_encrypted_chrome_cookie_is_not_returned() {
    let home = TempDir::new().unwrap();
    chrome_profile(
        home.path(),
        "Default",
        &[(".tiktok.com", "msToken", "", b"v10\x01\x02\x03")],
    );

    let encrypted = std::sync::Mutex::new(0);
    let observer = |event: ExtractionEvent<'_>| {
        if let ExtractionEvent::Encrypted(_) = event {
            *encrypted.lock().unwrap() += 1;
        }
    };

    let found = use_case(home.path())
        .execute(Some(Browser::Chrome), &observer)
        .await
        .unwrap();

    assert!(found.is_none());
    assert_eq!(*encrypted.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_corrupt_database_is_skipped() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".mozilla/firefox/broken");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("cookies.sqlite"), b"this is not a sqlite file").unwrap();
    firefox_profile(
        home.path(),
        "good",
        &[(".tiktok.com", "msToken", "good-token", 1)],
    );

    let found = use_case(home.path())
        .execute(Some(Browser::Firefox), &ignore)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.token.expose(), "good-token");
}

#[tokio::test]
async fn test_workflow_writes_token_file() {
    let home = TempDir::new().unwrap();
    firefox_profile(
        home.path(),
        "main",
        &[(".tiktok.com", "msToken", "saved-token", 1)],
    );
    let output = home.path().join("out/ms_token.txt");

    let workflow = TokenWorkflow::with_locator(CookieProfileLocator::new(
        home.path(),
        Platform::Linux,
    ));
    workflow
        .execute(TokenArgs {
            browser: None,
            output: output.clone(),
            stdout: false,
        })
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap().trim(), "saved-token");
}

#[tokio::test]
async fn test_workflow_fails_when_no_browser_has_token() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("ms_token.txt");

    let workflow = TokenWorkflow::with_locator(CookieProfileLocator::new(
        home.path(),
        Platform::Linux,
    ));
    let err = workflow
        .execute(TokenArgs {
            browser: None,
            output: output.clone(),
            stdout: false,
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Could not find ms_token in any browser");
    assert!(!output.exists());
}
