//! Start Played Game Use Case
//!
//! Attaches a catalog game to a player, copying its point value.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{GameId, PlayerId};

use crate::application::{actor::Actor, guard::ActiveGameGuard};
use crate::domain::entity::played_game::PlayedGame;
use crate::domain::repository::{GameRepository, PlayedGameRepository, PlayerRepository};
use crate::error::{PlaytrackError, PlaytrackResult};

pub struct StartPlayedGameUseCase<P, G, PG>
where
    P: PlayerRepository,
    G: GameRepository,
    PG: PlayedGameRepository,
{
    player_repo: Arc<P>,
    game_repo: Arc<G>,
    played_repo: Arc<PG>,
    guard: ActiveGameGuard<PG>,
}

impl<P, G, PG> StartPlayedGameUseCase<P, G, PG>
where
    P: PlayerRepository,
    G: GameRepository,
    PG: PlayedGameRepository,
{
    pub fn new(player_repo: Arc<P>, game_repo: Arc<G>, played_repo: Arc<PG>) -> Self {
        Self {
            player_repo,
            game_repo,
            guard: ActiveGameGuard::new(played_repo.clone()),
            played_repo,
        }
    }

    pub async fn execute(
        &self,
        actor: &Actor,
        player_id: PlayerId,
        game_id: GameId,
    ) -> PlaytrackResult<PlayedGame> {
        actor.ensure_can_act_for(&player_id)?;

        if self.player_repo.find_by_id(&player_id).await?.is_none() {
            return Err(PlaytrackError::not_found(format!("player {player_id}")));
        }

        let game = self
            .game_repo
            .find_by_id(&game_id)
            .await?
            .ok_or_else(|| PlaytrackError::not_found(format!("game {game_id}")))?;

        self.guard.assert_no_active_game(&player_id).await?;

        let played = PlayedGame::start(player_id, &game, Utc::now());
        self.played_repo.create(&played).await?;

        tracing::info!(
            played_game_id = %played.id,
            player_id = %player_id,
            game_id = %game_id,
            points = played.points,
            "Played game started"
        );

        Ok(played)
    }
}
