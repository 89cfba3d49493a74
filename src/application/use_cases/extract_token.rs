//! # Extract Token Use Case
//!
//! ブラウザのCookieから msToken を取り出すユースケース

use std::sync::Arc;

use anyhow::Result;
use log::{debug, warn};

use crate::domain::entities::{Browser, CookieDatabase, CookieLookup, SessionToken};
use crate::domain::repositories::cookie_repository::CookieRepository;

/// 抽出の途中経過（Driver層が表示に使う）
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent<'a> {
    /// ブラウザの探索を開始
    Trying(Browser),
    /// Cookieデータベースが見つからなかった
    NoDatabases(Browser),
    /// Cookieデータベースを発見した
    Discovered(Browser, usize),
    /// データベースを調べている
    Checking(&'a CookieDatabase),
    /// msToken はあるが暗号化されている
    Encrypted(&'a CookieDatabase),
    /// TikTokのCookieはあるが msToken がない
    NoToken {
        database: &'a CookieDatabase,
        tiktok_cookies: u64,
    },
    /// データベースを読めなかった
    Unreadable {
        database: &'a CookieDatabase,
        error: String,
    },
    /// msToken を発見した
    Found(&'a CookieDatabase),
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch {
    pub token: SessionToken,
    pub source: CookieDatabase,
}

/// 途中経過のコールバック
pub type ExtractionObserver<'a> = &'a (dyn Fn(ExtractionEvent<'_>) + Send + Sync);

/// msToken 抽出ユースケース
pub struct ExtractTokenUseCase<C: CookieRepository> {
    cookie_repository: Arc<C>,
}

impl<C: CookieRepository> ExtractTokenUseCase<C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `cookie_repository` - Cookieリポジトリ
    pub fn new(cookie_repository: Arc<C>) -> Self {
        Self { cookie_repository }
    }

    /// ブラウザを順に調べ、最初に見つかった msToken を返す
    ///
    /// # Arguments
    ///
    /// * `preferred` - 指定された場合はそのブラウザのみ調べる
    /// * `observer` - 途中経過のコールバック
    ///
    /// # Returns
    ///
    /// 見つかった場合は `Some(TokenMatch)`、どのブラウザにもなければ `None`
    pub async fn execute(
        &self,
        preferred: Option<Browser>,
        observer: ExtractionObserver<'_>,
    ) -> Result<Option<TokenMatch>> {
        for browser in Browser::search_order(preferred) {
            observer(ExtractionEvent::Trying(browser));

            let databases = match self.cookie_repository.discover(browser).await {
                Ok(databases) => self.prioritize(databases).await,
                Err(e) => {
                    warn!("Failed to discover {} profiles: {:#}", browser, e);
                    Vec::new()
                }
            };

            if databases.is_empty() {
                observer(ExtractionEvent::NoDatabases(browser));
                continue;
            }
            observer(ExtractionEvent::Discovered(browser, databases.len()));

            for database in &databases {
                observer(ExtractionEvent::Checking(database));

                match self.cookie_repository.lookup_ms_token(database).await {
                    Ok(CookieLookup::Found(value)) => match SessionToken::new(&value) {
                        Ok(token) => {
                            observer(ExtractionEvent::Found(database));
                            return Ok(Some(TokenMatch {
                                token,
                                source: database.clone(),
                            }));
                        }
                        Err(e) => {
                            warn!(
                                "Ignoring unusable msToken in {}: {}",
                                database.path.display(),
                                e
                            );
                        }
                    },
                    Ok(CookieLookup::Encrypted) => {
                        observer(ExtractionEvent::Encrypted(database));
                    }
                    Ok(CookieLookup::Missing { tiktok_cookies }) => {
                        debug!(
                            "No msToken in {} ({} TikTok cookies)",
                            database.path.display(),
                            tiktok_cookies
                        );
                        if tiktok_cookies > 0 {
                            observer(ExtractionEvent::NoToken {
                                database,
                                tiktok_cookies,
                            });
                        }
                    }
                    Err(e) => {
                        observer(ExtractionEvent::Unreadable {
                            database,
                            error: format!("{:#}", e),
                        });
                    }
                }
            }
        }

        Ok(None)
    }

    /// TikTokのCookieを含むデータベースを先頭に並べ替える（それぞれの順序は維持）
    async fn prioritize(&self, databases: Vec<CookieDatabase>) -> Vec<CookieDatabase> {
        let mut prioritized = Vec::new();
        let mut others = Vec::new();

        for database in databases {
            if self.cookie_repository.has_tiktok_cookies(&database).await {
                prioritized.push(database);
            } else {
                others.push(database);
            }
        }

        prioritized.extend(others);
        prioritized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::cookie_repository::MockCookieRepository;
    use std::sync::Mutex;

    fn db(browser: Browser, path: &str) -> CookieDatabase {
        CookieDatabase::new(browser, path)
    }

    fn ignore(_event: ExtractionEvent<'_>) {}

    #[tokio::test]
    async fn test_found_in_firefox() {
        let mut mock = MockCookieRepository::new();
        mock.expect_discover()
            .returning(|browser| Ok(vec![db(browser, "/ff/a/cookies.sqlite")]));
        mock.expect_has_tiktok_cookies().returning(|_| true);
        mock.expect_lookup_ms_token()
            .returning(|_| Ok(CookieLookup::Found("tok123".to_string())));

        let use_case = ExtractTokenUseCase::new(Arc::new(mock));
        let found = use_case.execute(None, &ignore).await.unwrap().unwrap();

        assert_eq!(found.token.expose(), "tok123");
        assert_eq!(found.source.browser, Browser::Firefox);
    }

    #[tokio::test]
    async fn test_falls_through_to_chrome() {
        let mut mock = MockCookieRepository::new();
        mock.expect_discover().returning(|browser| match browser {
            Browser::Firefox => Ok(vec![]),
            other => Ok(vec![db(other, "/chrome/Default/Cookies")]),
        });
        mock.expect_has_tiktok_cookies().returning(|_| false);
        mock.expect_lookup_ms_token()
            .returning(|_| Ok(CookieLookup::Found("from-chrome".to_string())));

        let events = Mutex::new(Vec::new());
        let observer = |event: ExtractionEvent<'_>| {
            events.lock().unwrap().push(format!("{:?}", event));
        };

        let use_case = ExtractTokenUseCase::new(Arc::new(mock));
        let found = use_case.execute(None, &observer).await.unwrap().unwrap();

        assert_eq!(found.source.browser, Browser::Chrome);
        let events = events.lock().unwrap();
        assert_eq!(events[0], "Trying(Firefox)");
        assert_eq!(events[1], "NoDatabases(Firefox)");
        assert_eq!(events[2], "Trying(Chrome)");
    }

    #[tokio::test]
    async fn test_prioritizes_databases_with_tiktok_cookies() {
        let mut mock = MockCookieRepository::new();
        mock.expect_discover().returning(|browser| {
            Ok(vec![
                db(browser, "/ff/empty/cookies.sqlite"),
                db(browser, "/ff/tiktok/cookies.sqlite"),
            ])
        });
        mock.expect_has_tiktok_cookies()
            .returning(|database| database.path.to_string_lossy().contains("tiktok"));

        let checked = Arc::new(Mutex::new(Vec::new()));
        let checked_in_mock = checked.clone();
        mock.expect_lookup_ms_token().returning(move |database| {
            checked_in_mock
                .lock()
                .unwrap()
                .push(database.path.to_string_lossy().to_string());
            Ok(CookieLookup::Missing { tiktok_cookies: 0 })
        });

        let use_case = ExtractTokenUseCase::new(Arc::new(mock));
        let found = use_case
            .execute(Some(Browser::Firefox), &ignore)
            .await
            .unwrap();

        assert!(found.is_none());
        assert_eq!(
            *checked.lock().unwrap(),
            vec!["/ff/tiktok/cookies.sqlite", "/ff/empty/cookies.sqlite"]
        );
    }

    #[tokio::test]
    async fn test_encrypted_and_unreadable_are_skipped() {
        let mut mock = MockCookieRepository::new();
        mock.expect_discover().returning(|browser| {
            Ok(vec![
                db(browser, "/edge/Default/Cookies"),
                db(browser, "/edge/Profile 1/Cookies"),
                db(browser, "/edge/Profile 2/Cookies"),
            ])
        });
        mock.expect_has_tiktok_cookies().returning(|_| false);
        mock.expect_lookup_ms_token().returning(|database| {
            let path = database.path.to_string_lossy().to_string();
            if path.contains("Default") {
                Ok(CookieLookup::Encrypted)
            } else if path.contains("Profile 1") {
                Err(anyhow::anyhow!("database is locked"))
            } else {
                Ok(CookieLookup::Found("edge-token".to_string()))
            }
        });

        let events = Mutex::new(Vec::new());
        let observer = |event: ExtractionEvent<'_>| {
            let label = match event {
                ExtractionEvent::Encrypted(_) => "encrypted",
                ExtractionEvent::Unreadable { .. } => "unreadable",
                ExtractionEvent::Found(_) => "found",
                _ => return,
            };
            events.lock().unwrap().push(label);
        };

        let use_case = ExtractTokenUseCase::new(Arc::new(mock));
        let found = use_case
            .execute(Some(Browser::Edge), &observer)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.token.expose(), "edge-token");
        assert_eq!(
            *events.lock().unwrap(),
            vec!["encrypted", "unreadable", "found"]
        );
    }

    #[tokio::test]
    async fn test_none_when_nothing_found() {
        let mut mock = MockCookieRepository::new();
        mock.expect_discover()
            .times(3)
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let use_case = ExtractTokenUseCase::new(Arc::new(mock));
        let found = use_case.execute(None, &ignore).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_blank_cookie_value_is_ignored() {
        let mut mock = MockCookieRepository::new();
        mock.expect_discover()
            .returning(|browser| Ok(vec![db(browser, "/ff/a/cookies.sqlite")]));
        mock.expect_has_tiktok_cookies().returning(|_| true);
        mock.expect_lookup_ms_token()
            .returning(|_| Ok(CookieLookup::Found("   ".to_string())));

        let use_case = ExtractTokenUseCase::new(Arc::new(mock));
        let found = use_case
            .execute(Some(Browser::Firefox), &ignore)
            .await
            .unwrap();

        assert!(found.is_none());
    }
}
