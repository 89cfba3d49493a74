//! # Session Token
//!
//! msToken（TikTokのセッションCookie）

use std::fmt;

use crate::domain::error::SessionError;

/// 検証済みのmsToken
///
/// `Debug` / `Display` では先頭数文字のみ表示し、値全体をログに残さない。
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// トークン文字列を検証して作成
    ///
    /// # Errors
    ///
    /// 空文字列、または途中に空白を含む場合にエラーを返す
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(SessionError::ContainsWhitespace);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// トークンの値（HTTPリクエストやファイル保存用）
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// 表示用に伏せ字化した値
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}… ({} chars)", prefix, self.0.chars().count())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&self.redacted()).finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        let token = SessionToken::new("  abc123==\n").unwrap();
        assert_eq!(token.expose(), "abc123==");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SessionToken::new("   \n"), Err(SessionError::Empty));
    }

    #[test]
    fn test_rejects_inner_whitespace() {
        assert_eq!(
            SessionToken::new("abc def"),
            Err(SessionError::ContainsWhitespace)
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = SessionToken::new("SECRETVALUE1234567890").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("SECRETVALUE1234567890"));
        assert!(debug.contains("SECRET"));
        assert!(token.to_string().contains("21 chars"));
    }
}
