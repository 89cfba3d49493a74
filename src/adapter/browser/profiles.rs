//! # Browser Profiles
//!
//! OSごとのブラウザプロファイルの場所からCookieデータベースを探す

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::Browser;

/// Chromium系のCookieデータベースのファイル名
const CHROMIUM_COOKIES: &str = "Cookies";
/// FirefoxのCookieデータベースのファイル名
const FIREFOX_COOKIES: &str = "cookies.sqlite";

/// プロファイルの配置を決めるOS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// 実行中のOS（Windows・macOS以外はLinuxの配置とみなす）
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Linux,
        }
    }
}

/// Cookieデータベースの探索
#[derive(Debug, Clone)]
pub struct CookieProfileLocator {
    home: PathBuf,
    platform: Platform,
}

impl CookieProfileLocator {
    /// ホームディレクトリとOSを指定して作成
    pub fn new(home: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            home: home.into(),
            platform,
        }
    }

    /// `~` と実行中のOSから作成
    pub fn from_env() -> Self {
        let home = shellexpand::tilde("~").to_string();
        Self::new(home, Platform::current())
    }

    /// ブラウザのプロファイルを格納するディレクトリ
    pub fn roots(&self, browser: Browser) -> Vec<PathBuf> {
        let relative: &[&str] = match (browser, self.platform) {
            (Browser::Firefox, Platform::Windows) => &[
                "AppData/Roaming/Mozilla/Firefox/Profiles",
                "AppData/Roaming/Mozilla/Firefox Developer Edition/Profiles",
            ],
            (Browser::Firefox, Platform::MacOs) => &[
                "Library/Application Support/Firefox/Profiles",
                "Library/Application Support/Firefox Developer Edition/Profiles",
            ],
            (Browser::Firefox, Platform::Linux) => {
                &[".mozilla/firefox", ".mozilla/firefox-developer-edition"]
            }
            (Browser::Chrome, Platform::Windows) => &["AppData/Local/Google/Chrome/User Data"],
            (Browser::Chrome, Platform::MacOs) => &["Library/Application Support/Google/Chrome"],
            (Browser::Chrome, Platform::Linux) => &[".config/google-chrome"],
            (Browser::Edge, Platform::Windows) => &["AppData/Local/Microsoft/Edge/User Data"],
            (Browser::Edge, Platform::MacOs) => &["Library/Application Support/Microsoft Edge"],
            (Browser::Edge, Platform::Linux) => &[".config/microsoft-edge"],
        };

        relative.iter().map(|r| self.home.join(r)).collect()
    }

    /// Cookieデータベースのパスを列挙する
    ///
    /// Chromium系は `Default` を先頭に、続けて `Profile *` を名前順に並べる
    pub fn locate(&self, browser: Browser) -> Vec<PathBuf> {
        self.roots(browser)
            .iter()
            .filter(|root| root.is_dir())
            .flat_map(|root| {
                if browser.is_chromium() {
                    chromium_databases(root)
                } else {
                    firefox_databases(root)
                }
            })
            .collect()
    }
}

/// `<root>/*/cookies.sqlite`
fn firefox_databases(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == FIREFOX_COOKIES)
        .map(|entry| entry.into_path())
        .collect()
}

/// `<root>/Default` と `<root>/Profile *` の中のCookieデータベース
fn chromium_databases(root: &Path) -> Vec<PathBuf> {
    let mut databases = profile_cookies(&root.join("Default"));

    let profiles = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| {
            entry.file_type().is_dir()
                && entry.file_name().to_string_lossy().starts_with("Profile ")
        })
        .flat_map(|entry| profile_cookies(entry.path()));
    databases.extend(profiles);

    databases
}

/// 1つのプロファイルのCookieデータベース（新しい `Network/Cookies` を先に）
fn profile_cookies(profile: &Path) -> Vec<PathBuf> {
    [
        profile.join("Network").join(CHROMIUM_COOKIES),
        profile.join(CHROMIUM_COOKIES),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}
