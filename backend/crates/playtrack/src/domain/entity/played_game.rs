//! Played Game Entity
//!
//! One player's attempt at one catalog game. Never deleted; mutated only
//! through [`PlayedGame::apply_update`] followed by the point policy in
//! `domain::services`.

use chrono::{DateTime, Utc};
use kernel::id::{GameId, PlayedGameId, PlayerId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::game::Game;
use crate::domain::value_object::{BoundedText, PlayTime, PlayedGameStatus, Rating};
use crate::error::{PlaytrackError, PlaytrackResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedGame {
    pub id: PlayedGameId,
    pub player_id: PlayerId,
    pub game_id: GameId,
    /// May be negative after a drop
    pub points: i32,
    pub comment: Option<BoundedText>,
    pub rating: Option<Rating>,
    pub status: PlayedGameStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub play_time: Option<PlayTime>,
}

impl PlayedGame {
    /// Attach a catalog game to a player (status `added`, points copied from the game)
    pub fn start(player_id: PlayerId, game: &Game, now: DateTime<Utc>) -> Self {
        Self {
            id: PlayedGameId::new(),
            player_id,
            game_id: game.id,
            points: game.points,
            comment: None,
            rating: None,
            status: PlayedGameStatus::Added,
            started_at: now,
            completed_at: None,
            play_time: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Set the start and (optionally) completion time.
    ///
    /// Without a new `completed_at` the stored one is kept, and must still
    /// come strictly after the new start.
    pub fn set_dates(
        &mut self,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> PlaytrackResult<()> {
        let completed_at = completed_at.or(self.completed_at);
        check_date_range(started_at, completed_at)?;
        self.started_at = started_at;
        self.completed_at = completed_at;
        Ok(())
    }

    /// Stamp `completed_at` with `now` unless already set
    pub fn complete_if_open(&mut self, now: DateTime<Utc>) -> PlaytrackResult<()> {
        if self.completed_at.is_none() {
            check_date_range(self.started_at, Some(now))?;
            self.completed_at = Some(now);
        }
        Ok(())
    }

    /// Move to `next` through the transition table
    pub fn set_status(&mut self, next: PlayedGameStatus) -> PlaytrackResult<()> {
        self.status = self.status.transition_to(next)?;
        Ok(())
    }

    /// Apply the supplied fields in order: points, comment, rating, dates,
    /// play time, status. Returns the new status if it changed.
    ///
    /// Works on `self` in place; callers keep the original to discard on error.
    pub fn apply_update(
        &mut self,
        update: &PlayedGameUpdate,
    ) -> PlaytrackResult<Option<PlayedGameStatus>> {
        if let Some(points) = update.points {
            self.points = points;
        }
        if let Some(comment) = &update.comment {
            self.comment = Some(BoundedText::new(comment.as_str())?);
        }
        if let Some(rating) = update.rating {
            self.rating = Some(Rating::new(rating)?);
        }
        match (update.started_at, update.completed_at) {
            (Some(started_at), completed_at) => self.set_dates(started_at, completed_at)?,
            (None, Some(_)) => {
                return Err(PlaytrackError::InvalidDateRange(
                    "completed_at must be supplied together with started_at".to_string(),
                ));
            }
            (None, None) => {}
        }
        if let Some(play_time) = update.play_time {
            self.play_time = Some(play_time);
        }
        match update.status {
            Some(next) => {
                self.set_status(next)?;
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    /// Re-check every invariant without touching the entity
    pub fn validate(&self) -> PlaytrackResult<()> {
        check_date_range(self.started_at, self.completed_at)?;
        if let Some(comment) = &self.comment {
            BoundedText::new(comment.as_str())?;
        }
        if let Some(rating) = self.rating {
            Rating::new(rating.value())?;
        }
        Ok(())
    }
}

fn check_date_range(
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> PlaytrackResult<()> {
    match completed_at {
        Some(completed_at) if completed_at <= started_at => {
            Err(PlaytrackError::InvalidDateRange(format!(
                "completed_at {completed_at} must be after started_at {started_at}"
            )))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Merge-patch input and persisted diff
// ============================================================================

/// Caller-supplied partial update; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayedGameUpdate {
    pub points: Option<i32>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
    pub status: Option<PlayedGameStatus>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub play_time: Option<PlayTime>,
}

/// Validated set of columns to write. Every `Some` overwrites, `None` keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayedGamePatch {
    pub points: Option<i32>,
    pub comment: Option<BoundedText>,
    pub rating: Option<Rating>,
    pub status: Option<PlayedGameStatus>,
    /// Status the change was validated against; the store refuses the
    /// write if the stored status differs
    pub expected_status: Option<PlayedGameStatus>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub play_time: Option<PlayTime>,
}

impl PlayedGamePatch {
    /// Fields of `after` that differ from `before`
    pub fn diff(before: &PlayedGame, after: &PlayedGame) -> Self {
        fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }

        Self {
            points: changed(&before.points, &after.points),
            comment: changed(&before.comment, &after.comment).flatten(),
            rating: changed(&before.rating, &after.rating).flatten(),
            status: changed(&before.status, &after.status),
            expected_status: (before.status != after.status).then_some(before.status),
            started_at: changed(&before.started_at, &after.started_at),
            completed_at: changed(&before.completed_at, &after.completed_at).flatten(),
            play_time: changed(&before.play_time, &after.play_time).flatten(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, played: &mut PlayedGame) {
        if let Some(points) = self.points {
            played.points = points;
        }
        if let Some(comment) = &self.comment {
            played.comment = Some(comment.clone());
        }
        if let Some(rating) = self.rating {
            played.rating = Some(rating);
        }
        if let Some(status) = self.status {
            played.status = status;
        }
        if let Some(started_at) = self.started_at {
            played.started_at = started_at;
        }
        if let Some(completed_at) = self.completed_at {
            played.completed_at = Some(completed_at);
        }
        if let Some(play_time) = self.play_time {
            played.play_time = Some(play_time);
        }
    }
}
