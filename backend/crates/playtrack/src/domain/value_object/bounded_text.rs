//! Bounded free text (played game comments, player descriptions)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlaytrackError, PlaytrackResult};

/// Maximum length in characters
pub const MAX_TEXT_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedText(String);

impl BoundedText {
    pub fn new(text: impl Into<String>) -> PlaytrackResult<Self> {
        let text = text.into();
        let actual = text.chars().count();
        if actual > MAX_TEXT_LENGTH {
            return Err(PlaytrackError::TextTooLong {
                max: MAX_TEXT_LENGTH,
                actual,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BoundedText {
    type Error = PlaytrackError;

    fn try_from(value: String) -> PlaytrackResult<Self> {
        BoundedText::new(value)
    }
}

impl From<BoundedText> for String {
    fn from(text: BoundedText) -> Self {
        text.0
    }
}

impl AsRef<str> for BoundedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_inclusive() {
        assert!(BoundedText::new("x".repeat(MAX_TEXT_LENGTH)).is_ok());
        assert!(matches!(
            BoundedText::new("x".repeat(MAX_TEXT_LENGTH + 1)),
            Err(PlaytrackError::TextTooLong { max: 256, actual: 257 })
        ));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 256 characters, 768 bytes
        assert!(BoundedText::new("あ".repeat(MAX_TEXT_LENGTH)).is_ok());
    }

    #[test]
    fn test_empty_is_allowed() {
        assert_eq!(BoundedText::new("").unwrap().as_str(), "");
    }
}
