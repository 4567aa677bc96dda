//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.
//! Lookups return `Ok(None)` on a miss; updates return `NotFound`.

use kernel::id::{GameId, PlayedGameId, PlayerId};

use crate::domain::entity::{
    game::Game,
    played_game::{PlayedGame, PlayedGamePatch},
    player::{Player, PlayerPatch},
};
use crate::domain::value_object::Username;
use crate::error::PlaytrackResult;

/// Player repository trait
#[trait_variant::make(PlayerRepository: Send)]
pub trait LocalPlayerRepository {
    async fn find_all(&self) -> PlaytrackResult<Vec<Player>>;

    async fn find_by_id(&self, id: &PlayerId) -> PlaytrackResult<Option<Player>>;

    async fn find_by_username(&self, username: &Username) -> PlaytrackResult<Option<Player>>;

    /// Fails with `UsernameTaken` on a duplicate username
    async fn create(&self, player: &Player) -> PlaytrackResult<()>;

    /// Merge-patch: only `Some` fields are written
    async fn update(&self, id: &PlayerId, patch: &PlayerPatch) -> PlaytrackResult<PlayerId>;
}

/// Game catalog repository trait
#[trait_variant::make(GameRepository: Send)]
pub trait LocalGameRepository {
    async fn find_all(&self) -> PlaytrackResult<Vec<Game>>;

    async fn find_by_id(&self, id: &GameId) -> PlaytrackResult<Option<Game>>;

    async fn create(&self, game: &Game) -> PlaytrackResult<()>;
}

/// Played game repository trait
#[trait_variant::make(PlayedGameRepository: Send)]
pub trait LocalPlayedGameRepository {
    /// All played games of a player, oldest start first
    async fn find_all_for_player(&self, player_id: &PlayerId) -> PlaytrackResult<Vec<PlayedGame>>;

    /// Find a played game scoped to its owner
    async fn find_by_id(
        &self,
        player_id: &PlayerId,
        id: &PlayedGameId,
    ) -> PlaytrackResult<Option<PlayedGame>>;

    /// Most recently started played game of the player that is not
    /// `rerolled`, ignoring `except`
    async fn find_last_not_rerolled(
        &self,
        player_id: &PlayerId,
        except: &PlayedGameId,
    ) -> PlaytrackResult<Option<PlayedGame>>;

    /// Fails with `ActiveGameExists` if the player already has a
    /// non-terminal played game
    async fn create(&self, played: &PlayedGame) -> PlaytrackResult<()>;

    /// Merge-patch: only `Some` fields are written.
    ///
    /// A status change fails with `Transition` when the stored status is no
    /// longer `patch.expected_status`.
    async fn update(
        &self,
        player_id: &PlayerId,
        id: &PlayedGameId,
        patch: &PlayedGamePatch,
    ) -> PlaytrackResult<PlayedGameId>;
}
