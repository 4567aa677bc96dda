//! Authenticate Player Use Case
//!
//! Checks a username/password pair. Token issuance belongs to the caller.

use std::sync::Arc;

use crate::application::config::PlaytrackConfig;
use crate::domain::entity::player::Player;
use crate::domain::repository::PlayerRepository;
use crate::domain::value_object::{RawPassword, Username};
use crate::error::{PlaytrackError, PlaytrackResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub username: String,
    pub password: String,
}

pub struct AuthenticatePlayerUseCase<P>
where
    P: PlayerRepository,
{
    player_repo: Arc<P>,
    config: Arc<PlaytrackConfig>,
}

impl<P> AuthenticatePlayerUseCase<P>
where
    P: PlayerRepository,
{
    pub fn new(player_repo: Arc<P>, config: Arc<PlaytrackConfig>) -> Self {
        Self {
            player_repo,
            config,
        }
    }

    /// Every failure (malformed input, unknown user, wrong password) is `Unauthorized`
    pub async fn execute(&self, input: AuthenticateInput) -> PlaytrackResult<Player> {
        let username =
            Username::new(&input.username).map_err(|_| PlaytrackError::Unauthorized)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| PlaytrackError::Unauthorized)?;

        let player = self
            .player_repo
            .find_by_username(&username)
            .await?
            .ok_or(PlaytrackError::Unauthorized)?;

        if !player.check_password(&raw_password, self.config.pepper()) {
            return Err(PlaytrackError::Unauthorized);
        }

        tracing::info!(player_id = %player.id, "Player authenticated");

        Ok(player)
    }
}
