//! Absolute URL (game store pages, player avatars)

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A string that parses as an absolute URI.
///
/// The original text is kept as supplied so that re-validation never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUrl(String);

impl WebUrl {
    pub fn parse(raw: impl Into<String>) -> Result<Self, url::ParseError> {
        let raw = raw.into();
        Url::parse(&raw)?;
        Ok(Self(raw))
    }

    /// Rebuild from a stored value
    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WebUrl {
    type Error = url::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WebUrl::parse(value)
    }
}

impl From<WebUrl> for String {
    fn from(url: WebUrl) -> Self {
        url.0
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls() {
        assert!(WebUrl::parse("https://store.steampowered.com/app/620").is_ok());
        assert!(WebUrl::parse("http://localhost:8080/img.png").is_ok());
    }

    #[test]
    fn test_relative_or_garbage_rejected() {
        assert_eq!(
            WebUrl::parse("/img/avatar.png").unwrap_err(),
            url::ParseError::RelativeUrlWithoutBase
        );
        assert!(WebUrl::parse("not a url").is_err());
        assert!(WebUrl::parse("").is_err());
    }

    #[test]
    fn test_keeps_original_text() {
        let url = WebUrl::parse("https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com");
    }
}
