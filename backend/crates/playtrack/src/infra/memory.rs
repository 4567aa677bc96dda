//! In-memory Repository Implementation
//!
//! A process-local store behind one `RwLock`. Every write runs its checks and
//! its mutation under the same write guard, which makes `create` of a played
//! game atomic with respect to the single-active-game rule.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use kernel::id::{GameId, PlayedGameId, PlayerId};

use crate::domain::entity::{
    game::Game,
    played_game::{PlayedGame, PlayedGamePatch},
    player::{Player, PlayerPatch},
};
use crate::domain::repository::{GameRepository, PlayedGameRepository, PlayerRepository};
use crate::domain::value_object::{PlayedGameStatus, TransitionError, Username};
use crate::error::{PlaytrackError, PlaytrackResult};

#[derive(Default)]
struct State {
    // Vec keeps insertion order, used as the tie-breaker for equal timestamps
    players: Vec<Player>,
    games: Vec<Game>,
    played_games: Vec<PlayedGame>,
}

#[derive(Default)]
pub struct InMemoryPlaytrackRepository {
    state: RwLock<State>,
}

impl InMemoryPlaytrackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PlaytrackResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| PlaytrackError::Internal("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> PlaytrackResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| PlaytrackError::Internal("in-memory store lock poisoned".to_string()))
    }
}

// ============================================================================
// Player Repository Implementation
// ============================================================================

impl PlayerRepository for InMemoryPlaytrackRepository {
    async fn find_all(&self) -> PlaytrackResult<Vec<Player>> {
        Ok(self.read()?.players.clone())
    }

    async fn find_by_id(&self, id: &PlayerId) -> PlaytrackResult<Option<Player>> {
        Ok(self.read()?.players.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> PlaytrackResult<Option<Player>> {
        Ok(self
            .read()?
            .players
            .iter()
            .find(|p| p.username == *username)
            .cloned())
    }

    async fn create(&self, player: &Player) -> PlaytrackResult<()> {
        let mut state = self.write()?;
        if state.players.iter().any(|p| p.username == player.username) {
            return Err(PlaytrackError::UsernameTaken);
        }
        state.players.push(player.clone());
        Ok(())
    }

    async fn update(&self, id: &PlayerId, patch: &PlayerPatch) -> PlaytrackResult<PlayerId> {
        let mut state = self.write()?;
        if let Some(username) = &patch.username {
            if state
                .players
                .iter()
                .any(|p| p.id != *id && p.username == *username)
            {
                return Err(PlaytrackError::UsernameTaken);
            }
        }
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| PlaytrackError::not_found(format!("player {id}")))?;
        patch.apply_to(player);
        Ok(*id)
    }
}

// ============================================================================
// Game Repository Implementation
// ============================================================================

impl GameRepository for InMemoryPlaytrackRepository {
    async fn find_all(&self) -> PlaytrackResult<Vec<Game>> {
        Ok(self.read()?.games.clone())
    }

    async fn find_by_id(&self, id: &GameId) -> PlaytrackResult<Option<Game>> {
        Ok(self.read()?.games.iter().find(|g| g.id == *id).cloned())
    }

    async fn create(&self, game: &Game) -> PlaytrackResult<()> {
        self.write()?.games.push(game.clone());
        Ok(())
    }
}

// ============================================================================
// Played Game Repository Implementation
// ============================================================================

impl PlayedGameRepository for InMemoryPlaytrackRepository {
    async fn find_all_for_player(&self, player_id: &PlayerId) -> PlaytrackResult<Vec<PlayedGame>> {
        let mut played: Vec<PlayedGame> = self
            .read()?
            .played_games
            .iter()
            .filter(|pg| pg.player_id == *player_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal start times
        played.sort_by_key(|pg| pg.started_at);
        Ok(played)
    }

    async fn find_by_id(
        &self,
        player_id: &PlayerId,
        id: &PlayedGameId,
    ) -> PlaytrackResult<Option<PlayedGame>> {
        Ok(self
            .read()?
            .played_games
            .iter()
            .find(|pg| pg.id == *id && pg.player_id == *player_id)
            .cloned())
    }

    async fn find_last_not_rerolled(
        &self,
        player_id: &PlayerId,
        except: &PlayedGameId,
    ) -> PlaytrackResult<Option<PlayedGame>> {
        // max_by_key returns the last maximum, i.e. the latest inserted on ties
        Ok(self
            .read()?
            .played_games
            .iter()
            .filter(|pg| {
                pg.player_id == *player_id
                    && pg.id != *except
                    && pg.status != PlayedGameStatus::Rerolled
            })
            .max_by_key(|pg| pg.started_at)
            .cloned())
    }

    async fn create(&self, played: &PlayedGame) -> PlaytrackResult<()> {
        let mut state = self.write()?;
        if played.is_active() {
            if let Some(active) = state
                .played_games
                .iter()
                .find(|pg| pg.player_id == played.player_id && pg.is_active())
            {
                return Err(PlaytrackError::ActiveGameExists(active.id));
            }
        }
        state.played_games.push(played.clone());
        Ok(())
    }

    async fn update(
        &self,
        player_id: &PlayerId,
        id: &PlayedGameId,
        patch: &PlayedGamePatch,
    ) -> PlaytrackResult<PlayedGameId> {
        let mut state = self.write()?;
        let played = state
            .played_games
            .iter_mut()
            .find(|pg| pg.id == *id && pg.player_id == *player_id)
            .ok_or_else(|| PlaytrackError::not_found(format!("played game {id}")))?;
        if let (Some(expected), Some(to)) = (patch.expected_status, patch.status) {
            if played.status != expected {
                return Err(TransitionError {
                    from: played.status,
                    to,
                }
                .into());
            }
        }
        patch.apply_to(played);
        Ok(*id)
    }
}
