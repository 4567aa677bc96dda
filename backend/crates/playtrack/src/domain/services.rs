//! Domain Services
//!
//! Pure scoring logic: the catalog point formula and the point policy that
//! runs when a played game changes status.

use chrono::{DateTime, Utc};

use crate::domain::entity::played_game::PlayedGame;
use crate::domain::value_object::PlayedGameStatus;
use crate::error::{PlaytrackError, PlaytrackResult};

pub const MIN_HOURS_TO_BEAT: i32 = 1;

/// Points for a drop with no dropped game right before it
pub const DROP_PENALTY: i32 = -1;

/// Points for a rerolled game
pub const REROLL_POINTS: i32 = 0;

/// Catalog point value for a game of the given length.
///
/// `≤ 2h → 1`, otherwise `1 + (h + 1) / 4`.
pub fn calculate_points(hours_to_beat: i32) -> PlaytrackResult<i32> {
    if hours_to_beat < MIN_HOURS_TO_BEAT {
        return Err(PlaytrackError::InvalidGame(format!(
            "hours to beat must not be less than {MIN_HOURS_TO_BEAT}"
        )));
    }
    if hours_to_beat <= 2 {
        return Ok(1);
    }
    Ok(1 + (hours_to_beat + 1) / 4)
}

/// Penalty for dropping a game.
///
/// `prior` is the player's most recent non-rerolled played game other than
/// the one being dropped. Consecutive drops stack by one point each.
pub fn drop_points(prior: Option<&PlayedGame>) -> i32 {
    match prior {
        Some(prev) if prev.status == PlayedGameStatus::Dropped => prev.points + DROP_PENALTY,
        _ => DROP_PENALTY,
    }
}

/// Settle points and completion time after a status change.
///
/// `completed` keeps the points already on the game; `dropped` and
/// `rerolled` overwrite them. All terminal states get a completion time.
pub fn apply_point_policy(
    played: &mut PlayedGame,
    prior: Option<&PlayedGame>,
    now: DateTime<Utc>,
) -> PlaytrackResult<()> {
    match played.status {
        PlayedGameStatus::Dropped => {
            played.points = drop_points(prior);
            played.complete_if_open(now)
        }
        PlayedGameStatus::Rerolled => {
            played.points = REROLL_POINTS;
            played.complete_if_open(now)
        }
        PlayedGameStatus::Completed => played.complete_if_open(now),
        PlayedGameStatus::Added | PlayedGameStatus::InProgress => Ok(()),
    }
}
