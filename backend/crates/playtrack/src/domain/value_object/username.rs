//! Username Value Object
//!
//! プレイヤーの公開ハンドル。ログインとリーダーボード表示に使用される。
//!
//! ## 不変条件
//! - NFKC 正規化後の長さ: 4 文字以上（上限なし）
//! - 制御文字は不可

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::error::{PlaytrackError, PlaytrackResult};

// ============================================================================
// Constants
// ============================================================================

pub const USERNAME_MIN_LENGTH: usize = 4;

// ============================================================================
// Username
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Normalize and validate a username
    pub fn new(raw: impl AsRef<str>) -> PlaytrackResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();

        if normalized.chars().count() < USERNAME_MIN_LENGTH {
            return Err(PlaytrackError::InvalidPlayer(format!(
                "username must not be less than {USERNAME_MIN_LENGTH} symbols"
            )));
        }

        if normalized.chars().any(char::is_control) {
            return Err(PlaytrackError::InvalidPlayer(
                "username contains control characters".to_string(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Rebuild from a stored value
    pub fn from_db(value: String) -> PlaytrackResult<Self> {
        Self::new(&value).map_err(|e| PlaytrackError::Internal(format!("stored username: {e}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = PlaytrackError;

    fn try_from(value: String) -> PlaytrackResult<Self> {
        Username::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
