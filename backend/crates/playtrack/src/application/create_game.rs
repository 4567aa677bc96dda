//! Create Game Use Case
//!
//! Adds a game to the catalog.

use std::sync::Arc;

use crate::domain::entity::game::{Game, NewGame};
use crate::domain::repository::GameRepository;
use crate::error::PlaytrackResult;

pub struct CreateGameUseCase<G>
where
    G: GameRepository,
{
    game_repo: Arc<G>,
}

impl<G> CreateGameUseCase<G>
where
    G: GameRepository,
{
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    pub async fn execute(&self, input: NewGame) -> PlaytrackResult<Game> {
        let game = Game::new(input)?;
        self.game_repo.create(&game).await?;

        tracing::info!(
            game_id = %game.id,
            title = %game.title,
            points = game.points,
            "Game added to catalog"
        );

        Ok(game)
    }
}
