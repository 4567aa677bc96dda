//! Single-active-game guard
//!
//! A player may not start a new played game while an earlier one is still
//! `added` or `in_progress`. This is a check-then-act read; the store's
//! `create` closes the race (unique index on PostgreSQL, a single lock in memory).

use std::sync::Arc;

use kernel::id::PlayerId;

use crate::domain::repository::PlayedGameRepository;
use crate::error::{PlaytrackError, PlaytrackResult};

pub struct ActiveGameGuard<PG>
where
    PG: PlayedGameRepository,
{
    played_repo: Arc<PG>,
}

impl<PG> ActiveGameGuard<PG>
where
    PG: PlayedGameRepository,
{
    pub fn new(played_repo: Arc<PG>) -> Self {
        Self { played_repo }
    }

    /// Fails with `ActiveGameExists` naming the first non-terminal played game
    pub async fn assert_no_active_game(&self, player_id: &PlayerId) -> PlaytrackResult<()> {
        let played = self.played_repo.find_all_for_player(player_id).await?;
        match played.iter().find(|pg| pg.is_active()) {
            Some(active) => Err(PlaytrackError::ActiveGameExists(active.id)),
            None => Ok(()),
        }
    }
}
