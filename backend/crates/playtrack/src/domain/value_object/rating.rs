//! Rating Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlaytrackError, PlaytrackResult};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 100;

/// Player's score for a played game, in `[MIN_RATING, MAX_RATING]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    pub fn new(value: i32) -> PlaytrackResult<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(PlaytrackError::InvalidRating { value });
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = PlaytrackError;

    fn try_from(value: i32) -> PlaytrackResult<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(100).unwrap().value(), 100);
    }

    #[test]
    fn test_out_of_range() {
        for value in [0, -5, 101, i32::MAX] {
            assert!(matches!(
                Rating::new(value),
                Err(PlaytrackError::InvalidRating { value: v }) if v == value
            ));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Rating>("42").is_ok());
        assert!(serde_json::from_str::<Rating>("0").is_err());
    }
}
