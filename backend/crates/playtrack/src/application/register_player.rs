//! Register Player Use Case
//!
//! Creates a new player with a hashed password.

use std::sync::Arc;

use crate::application::config::PlaytrackConfig;
use crate::domain::entity::player::{NewPlayer, Player};
use crate::domain::repository::PlayerRepository;
use crate::error::{PlaytrackError, PlaytrackResult};

pub struct RegisterPlayerUseCase<P>
where
    P: PlayerRepository,
{
    player_repo: Arc<P>,
    config: Arc<PlaytrackConfig>,
}

impl<P> RegisterPlayerUseCase<P>
where
    P: PlayerRepository,
{
    pub fn new(player_repo: Arc<P>, config: Arc<PlaytrackConfig>) -> Self {
        Self {
            player_repo,
            config,
        }
    }

    pub async fn execute(&self, input: NewPlayer) -> PlaytrackResult<Player> {
        let player = Player::register(input, self.config.pepper())?;

        if self
            .player_repo
            .find_by_username(&player.username)
            .await?
            .is_some()
        {
            return Err(PlaytrackError::UsernameTaken);
        }

        self.player_repo.create(&player).await?;

        tracing::info!(
            player_id = %player.id,
            username = %player.username,
            is_admin = player.is_admin,
            "Player registered"
        );

        Ok(player)
    }
}
