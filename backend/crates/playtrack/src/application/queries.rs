//! Read-side queries and the leaderboard

use std::cmp::Reverse;
use std::sync::Arc;

use kernel::id::{GameId, PlayedGameId, PlayerId};
use serde::Serialize;

use crate::domain::entity::{game::Game, played_game::PlayedGame, player::Player};
use crate::domain::repository::{GameRepository, PlayedGameRepository, PlayerRepository};
use crate::domain::value_object::{PlayedGameStatus, Username};
use crate::error::{PlaytrackError, PlaytrackResult};

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub username: Username,
    /// Sum of the player's played game points
    pub points: i64,
    pub completed: usize,
    pub dropped: usize,
    pub rerolled: usize,
    pub total: usize,
}

impl LeaderboardEntry {
    pub fn tally(player: &Player, played: &[PlayedGame]) -> Self {
        let count = |status: PlayedGameStatus| played.iter().filter(|pg| pg.status == status).count();

        Self {
            player_id: player.id,
            username: player.username.clone(),
            points: played.iter().map(|pg| i64::from(pg.points)).sum(),
            completed: count(PlayedGameStatus::Completed),
            dropped: count(PlayedGameStatus::Dropped),
            rerolled: count(PlayedGameStatus::Rerolled),
            total: played.len(),
        }
    }
}

/// Highest points first, ties by username
pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        Reverse(a.points)
            .cmp(&Reverse(b.points))
            .then_with(|| a.username.cmp(&b.username))
    });
    entries
}

pub struct PlaytrackQueries<P, G, PG>
where
    P: PlayerRepository,
    G: GameRepository,
    PG: PlayedGameRepository,
{
    player_repo: Arc<P>,
    game_repo: Arc<G>,
    played_repo: Arc<PG>,
}

impl<P, G, PG> PlaytrackQueries<P, G, PG>
where
    P: PlayerRepository,
    G: GameRepository,
    PG: PlayedGameRepository,
{
    pub fn new(player_repo: Arc<P>, game_repo: Arc<G>, played_repo: Arc<PG>) -> Self {
        Self {
            player_repo,
            game_repo,
            played_repo,
        }
    }

    pub async fn list_players(&self) -> PlaytrackResult<Vec<Player>> {
        self.player_repo.find_all().await
    }

    pub async fn get_player(&self, id: PlayerId) -> PlaytrackResult<Player> {
        self.player_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| PlaytrackError::not_found(format!("player {id}")))
    }

    pub async fn list_games(&self) -> PlaytrackResult<Vec<Game>> {
        self.game_repo.find_all().await
    }

    pub async fn get_game(&self, id: GameId) -> PlaytrackResult<Game> {
        self.game_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| PlaytrackError::not_found(format!("game {id}")))
    }

    pub async fn list_played_games(&self, player_id: PlayerId) -> PlaytrackResult<Vec<PlayedGame>> {
        self.played_repo.find_all_for_player(&player_id).await
    }

    pub async fn get_played_game(
        &self,
        player_id: PlayerId,
        id: PlayedGameId,
    ) -> PlaytrackResult<PlayedGame> {
        self.played_repo
            .find_by_id(&player_id, &id)
            .await?
            .ok_or_else(|| PlaytrackError::not_found(format!("played game {id}")))
    }

    pub async fn leaderboard(&self) -> PlaytrackResult<Vec<LeaderboardEntry>> {
        let players = self.player_repo.find_all().await?;

        let mut entries = Vec::with_capacity(players.len());
        for player in &players {
            let played = self.played_repo.find_all_for_player(&player.id).await?;
            entries.push(LeaderboardEntry::tally(player, &played));
        }

        Ok(rank(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, points: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_id: PlayerId::new(),
            username: Username::new(name).unwrap(),
            points,
            completed: 0,
            dropped: 0,
            rerolled: 0,
            total: 0,
        }
    }

    #[test]
    fn test_rank_orders_by_points_then_name() {
        let ranked = rank(vec![
            entry("zelda", 3),
            entry("bravo", 10),
            entry("alpha", 3),
            entry("minus", -2),
        ]);
        let names: Vec<_> = ranked.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bravo", "alpha", "zelda", "minus"]);
    }
}
