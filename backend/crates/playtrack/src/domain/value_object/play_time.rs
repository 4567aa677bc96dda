//! Play Time Value Object
//!
//! Time a player spent on a played game. Persisted as whole seconds and
//! exchanged as a compact duration string such as `"12h30m0s"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{PlaytrackError, PlaytrackResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlayTime(Duration);

impl PlayTime {
    pub const fn new(duration: Duration) -> Self {
        Self(Duration::from_secs(duration.as_secs()))
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Rebuild from the stored number of seconds
    pub fn from_db(secs: i64) -> PlaytrackResult<Self> {
        u64::try_from(secs)
            .map(Self::from_secs)
            .map_err(|_| PlaytrackError::Internal(format!("negative stored play time: {secs}")))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole seconds for storage (saturates at `i64::MAX`)
    pub fn as_db_secs(&self) -> i64 {
        i64::try_from(self.0.as_secs()).unwrap_or(i64::MAX)
    }
}

impl From<Duration> for PlayTime {
    fn from(duration: Duration) -> Self {
        Self::new(duration)
    }
}

/// Error for malformed duration strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid play time {0:?}: expected e.g. \"1h30m\", \"45m\" or \"90s\"")]
pub struct ParsePlayTimeError(String);

impl FromStr for PlayTime {
    type Err = ParsePlayTimeError;

    /// Accepts a sequence of `<integer><unit>` with units `h`, `m`, `s`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePlayTimeError(s.to_string());
        if s.is_empty() {
            return Err(err());
        }

        let mut total: u64 = 0;
        let mut digits = String::new();
        for ch in s.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }
            let factor = match ch {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return Err(err()),
            };
            let value: u64 = digits.parse().map_err(|_| err())?;
            total = value
                .checked_mul(factor)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(err)?;
            digits.clear();
        }

        // A trailing number without unit is ambiguous, except a lone "0"
        if !digits.is_empty() {
            if s == "0" {
                return Ok(Self::default());
            }
            return Err(err());
        }

        Ok(Self::from_secs(total))
    }
}

impl fmt::Display for PlayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
        if h > 0 {
            write!(f, "{h}h{m}m{s}s")
        } else if m > 0 {
            write!(f, "{m}m{s}s")
        } else {
            write!(f, "{s}s")
        }
    }
}

impl Serialize for PlayTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlayTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
