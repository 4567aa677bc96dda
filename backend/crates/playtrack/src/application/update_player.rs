//! Update Player Use Case
//!
//! Merge-patch of a player's profile. Only supplied fields are validated.

use std::sync::Arc;

use kernel::id::PlayerId;

use crate::application::{actor::Actor, config::PlaytrackConfig};
use crate::domain::entity::player::{Player, PlayerUpdate};
use crate::domain::repository::PlayerRepository;
use crate::error::{PlaytrackError, PlaytrackResult};

pub struct UpdatePlayerUseCase<P>
where
    P: PlayerRepository,
{
    player_repo: Arc<P>,
    config: Arc<PlaytrackConfig>,
}

impl<P> UpdatePlayerUseCase<P>
where
    P: PlayerRepository,
{
    pub fn new(player_repo: Arc<P>, config: Arc<PlaytrackConfig>) -> Self {
        Self {
            player_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        actor: &Actor,
        player_id: PlayerId,
        input: PlayerUpdate,
    ) -> PlaytrackResult<Player> {
        actor.ensure_can_act_for(&player_id)?;

        let patch = input.validate(self.config.pepper())?;

        let mut player = self
            .player_repo
            .find_by_id(&player_id)
            .await?
            .ok_or_else(|| PlaytrackError::not_found(format!("player {player_id}")))?;

        if patch.is_empty() {
            return Ok(player);
        }

        if let Some(username) = &patch.username {
            if *username != player.username
                && self.player_repo.find_by_username(username).await?.is_some()
            {
                return Err(PlaytrackError::UsernameTaken);
            }
        }

        self.player_repo.update(&player_id, &patch).await?;
        patch.apply_to(&mut player);

        tracing::info!(
            player_id = %player.id,
            actor_id = %actor.player_id,
            password_changed = patch.password.is_some(),
            "Player updated"
        );

        Ok(player)
    }
}
