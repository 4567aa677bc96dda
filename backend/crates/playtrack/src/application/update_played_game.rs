//! Update Played Game Use Case
//!
//! Applies a merge-patch to a played game, runs the status transition and
//! point policy, then writes only the changed columns. Any failure before
//! the final write leaves the stored game untouched.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PlayedGameId, PlayerId};

use crate::application::actor::Actor;
use crate::domain::entity::played_game::{PlayedGame, PlayedGamePatch, PlayedGameUpdate};
use crate::domain::repository::PlayedGameRepository;
use crate::domain::services::apply_point_policy;
use crate::domain::value_object::PlayedGameStatus;
use crate::error::{PlaytrackError, PlaytrackResult};

pub struct UpdatePlayedGameUseCase<PG>
where
    PG: PlayedGameRepository,
{
    played_repo: Arc<PG>,
}

impl<PG> UpdatePlayedGameUseCase<PG>
where
    PG: PlayedGameRepository,
{
    pub fn new(played_repo: Arc<PG>) -> Self {
        Self { played_repo }
    }

    pub async fn execute(
        &self,
        actor: &Actor,
        player_id: PlayerId,
        played_game_id: PlayedGameId,
        update: PlayedGameUpdate,
    ) -> PlaytrackResult<PlayedGame> {
        actor.ensure_can_act_for(&player_id)?;

        let before = self
            .played_repo
            .find_by_id(&player_id, &played_game_id)
            .await?
            .ok_or_else(|| PlaytrackError::not_found(format!("played game {played_game_id}")))?;

        let mut after = before.clone();
        if let Some(status) = after.apply_update(&update)? {
            let prior = match status {
                PlayedGameStatus::Dropped => {
                    self.played_repo
                        .find_last_not_rerolled(&player_id, &played_game_id)
                        .await?
                }
                _ => None,
            };
            apply_point_policy(&mut after, prior.as_ref(), Utc::now())?;
        }

        let patch = PlayedGamePatch::diff(&before, &after);
        if patch.is_empty() {
            return Ok(after);
        }

        self.played_repo
            .update(&player_id, &played_game_id, &patch)
            .await?;

        tracing::info!(
            played_game_id = %played_game_id,
            player_id = %player_id,
            status = %after.status,
            points = after.points,
            "Played game updated"
        );

        Ok(after)
    }
}
