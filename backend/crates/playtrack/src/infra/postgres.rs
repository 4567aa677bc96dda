//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{GameId, PlayedGameId, PlayerId};

use crate::domain::entity::{
    game::Game,
    played_game::{PlayedGame, PlayedGamePatch},
    player::{Player, PlayerPatch},
};
use crate::domain::repository::{GameRepository, PlayedGameRepository, PlayerRepository};
use crate::domain::value_object::{
    BoundedText, Email, PlayTime, PlayedGameStatus, PlayerPassword, Rating, TransitionError,
    Username, WebUrl,
};
use crate::error::{PlaytrackError, PlaytrackResult};

const USERNAME_UNIQUE: &str = "players_username_key";
const ONE_ACTIVE_PER_PLAYER: &str = "played_games_one_active_per_player";

/// PostgreSQL-backed playtrack repository
#[derive(Clone)]
pub struct PgPlaytrackRepository {
    pool: PgPool,
}

impl PgPlaytrackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_active_id(&self, player_id: &PlayerId) -> PlaytrackResult<Option<PlayedGameId>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM played_games
            WHERE player_id = $1 AND status IN ('added', 'in_progress')
            LIMIT 1
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(PlayedGameId::from_uuid))
    }
}

/// True if `err` is a unique violation of the named constraint
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

// ============================================================================
// Player Repository Implementation
// ============================================================================

impl PlayerRepository for PgPlaytrackRepository {
    async fn find_all(&self) -> PlaytrackResult<Vec<Player>> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                is_admin,
                image,
                email,
                description,
                created_at
            FROM players
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_player()).collect()
    }

    async fn find_by_id(&self, id: &PlayerId) -> PlaytrackResult<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                is_admin,
                image,
                email,
                description,
                created_at
            FROM players
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_player()).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> PlaytrackResult<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                is_admin,
                image,
                email,
                description,
                created_at
            FROM players
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_player()).transpose()
    }

    async fn create(&self, player: &Player) -> PlaytrackResult<()> {
        sqlx::query(
            r#"
            INSERT INTO players (
                id,
                username,
                password_hash,
                is_admin,
                image,
                email,
                description,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(player.id.as_uuid())
        .bind(player.username.as_str())
        .bind(player.password.as_str())
        .bind(player.is_admin)
        .bind(player.image.as_ref().map(|u| u.as_str()))
        .bind(player.email.as_ref().map(|e| e.as_str()))
        .bind(player.description.as_ref().map(|d| d.as_str()))
        .bind(player.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, USERNAME_UNIQUE) {
                PlaytrackError::UsernameTaken
            } else {
                PlaytrackError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, id: &PlayerId, patch: &PlayerPatch) -> PlaytrackResult<PlayerId> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE players SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                image = COALESCE($4, image),
                email = COALESCE($5, email),
                description = COALESCE($6, description)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.username.as_ref().map(|u| u.as_str()))
        .bind(patch.password.as_ref().map(|p| p.as_str()))
        .bind(patch.image.as_ref().map(|u| u.as_str()))
        .bind(patch.email.as_ref().map(|e| e.as_str()))
        .bind(patch.description.as_ref().map(|d| d.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, USERNAME_UNIQUE) {
                PlaytrackError::UsernameTaken
            } else {
                PlaytrackError::Database(e)
            }
        })?;

        updated
            .map(PlayerId::from_uuid)
            .ok_or_else(|| PlaytrackError::not_found(format!("player {id}")))
    }
}

// ============================================================================
// Game Repository Implementation
// ============================================================================

impl GameRepository for PgPlaytrackRepository {
    async fn find_all(&self) -> PlaytrackResult<Vec<Game>> {
        let rows = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT id, title, hours_to_beat, url, points, created_at
            FROM games
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_game()).collect())
    }

    async fn find_by_id(&self, id: &GameId) -> PlaytrackResult<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT id, title, hours_to_beat, url, points, created_at
            FROM games
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_game()))
    }

    async fn create(&self, game: &Game) -> PlaytrackResult<()> {
        sqlx::query(
            r#"
            INSERT INTO games (id, title, hours_to_beat, url, points, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(game.id.as_uuid())
        .bind(&game.title)
        .bind(game.hours_to_beat)
        .bind(game.url.as_ref().map(|u| u.as_str()))
        .bind(game.points)
        .bind(game.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Played Game Repository Implementation
// ============================================================================

impl PlayedGameRepository for PgPlaytrackRepository {
    async fn find_all_for_player(&self, player_id: &PlayerId) -> PlaytrackResult<Vec<PlayedGame>> {
        let rows = sqlx::query_as::<_, PlayedGameRow>(
            r#"
            SELECT
                id,
                player_id,
                game_id,
                points,
                comment,
                rating,
                status,
                started_at,
                completed_at,
                play_time_secs
            FROM played_games
            WHERE player_id = $1
            ORDER BY started_at, row_seq
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_played_game()).collect()
    }

    async fn find_by_id(
        &self,
        player_id: &PlayerId,
        id: &PlayedGameId,
    ) -> PlaytrackResult<Option<PlayedGame>> {
        let row = sqlx::query_as::<_, PlayedGameRow>(
            r#"
            SELECT
                id,
                player_id,
                game_id,
                points,
                comment,
                rating,
                status,
                started_at,
                completed_at,
                play_time_secs
            FROM played_games
            WHERE id = $1 AND player_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_played_game()).transpose()
    }

    async fn find_last_not_rerolled(
        &self,
        player_id: &PlayerId,
        except: &PlayedGameId,
    ) -> PlaytrackResult<Option<PlayedGame>> {
        let row = sqlx::query_as::<_, PlayedGameRow>(
            r#"
            SELECT
                id,
                player_id,
                game_id,
                points,
                comment,
                rating,
                status,
                started_at,
                completed_at,
                play_time_secs
            FROM played_games
            WHERE player_id = $1 AND id <> $2 AND status <> 'rerolled'
            ORDER BY started_at DESC, row_seq DESC
            LIMIT 1
            "#,
        )
        .bind(player_id.as_uuid())
        .bind(except.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_played_game()).transpose()
    }

    async fn create(&self, played: &PlayedGame) -> PlaytrackResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO played_games (
                id,
                player_id,
                game_id,
                points,
                comment,
                rating,
                status,
                started_at,
                completed_at,
                play_time_secs
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(played.id.as_uuid())
        .bind(played.player_id.as_uuid())
        .bind(played.game_id.as_uuid())
        .bind(played.points)
        .bind(played.comment.as_ref().map(|c| c.as_str()))
        .bind(played.rating.map(|r| r.value()))
        .bind(played.status.code())
        .bind(played.started_at)
        .bind(played.completed_at)
        .bind(played.play_time.map(|t| t.as_db_secs()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if violates(&e, ONE_ACTIVE_PER_PLAYER) => {
                // Lost the race against a concurrent start
                let active = self.find_active_id(&played.player_id).await?;
                tracing::warn!(
                    player_id = %played.player_id,
                    "Concurrent start rejected by active game index"
                );
                Err(match active {
                    Some(id) => PlaytrackError::ActiveGameExists(id),
                    None => PlaytrackError::Database(e),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        player_id: &PlayerId,
        id: &PlayedGameId,
        patch: &PlayedGamePatch,
    ) -> PlaytrackResult<PlayedGameId> {
        // A status change only lands if the row still has the status it was
        // validated against
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE played_games SET
                points = COALESCE($3, points),
                comment = COALESCE($4, comment),
                rating = COALESCE($5, rating),
                status = COALESCE($6, status),
                started_at = COALESCE($7, started_at),
                completed_at = COALESCE($8, completed_at),
                play_time_secs = COALESCE($9, play_time_secs)
            WHERE id = $1 AND player_id = $2
                AND ($10::TEXT IS NULL OR status = $10)
            RETURNING id
            "#,
        )
        .bind(id.as_uuid())
        .bind(player_id.as_uuid())
        .bind(patch.points)
        .bind(patch.comment.as_ref().map(|c| c.as_str()))
        .bind(patch.rating.map(|r| r.value()))
        .bind(patch.status.map(|s| s.code()))
        .bind(patch.started_at)
        .bind(patch.completed_at)
        .bind(patch.play_time.map(|t| t.as_db_secs()))
        .bind(patch.expected_status.map(|s| s.code()))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(updated) = updated {
            return Ok(PlayedGameId::from_uuid(updated));
        }

        // No row: either it does not exist or its status moved underneath us
        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM played_games WHERE id = $1 AND player_id = $2",
        )
        .bind(id.as_uuid())
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match (current, patch.status) {
            (Some(code), Some(to)) => {
                let from = PlayedGameStatus::from_code(&code)
                    .ok_or_else(|| PlaytrackError::Internal(format!("Invalid status: {}", code)))?;
                tracing::warn!(
                    played_game_id = %id,
                    from = %from,
                    to = %to,
                    "Concurrent status change rejected"
                );
                Err(TransitionError { from, to }.into())
            }
            _ => Err(PlaytrackError::not_found(format!("played game {id}"))),
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: Uuid,
    username: String,
    password_hash: String,
    is_admin: bool,
    image: Option<String>,
    email: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl PlayerRow {
    fn into_player(self) -> PlaytrackResult<Player> {
        let description = self
            .description
            .map(BoundedText::new)
            .transpose()
            .map_err(|e| PlaytrackError::Internal(format!("Invalid description: {}", e)))?;

        Ok(Player {
            id: PlayerId::from_uuid(self.id),
            username: Username::from_db(self.username)?,
            password: PlayerPassword::from_db(&self.password_hash)?,
            is_admin: self.is_admin,
            image: self.image.map(WebUrl::from_db),
            email: self.email.map(Email::from_db),
            description,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct GameRow {
    id: Uuid,
    title: String,
    hours_to_beat: i32,
    url: Option<String>,
    points: i32,
    created_at: DateTime<Utc>,
}

impl GameRow {
    fn into_game(self) -> Game {
        Game {
            id: GameId::from_uuid(self.id),
            title: self.title,
            hours_to_beat: self.hours_to_beat,
            url: self.url.map(WebUrl::from_db),
            points: self.points,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PlayedGameRow {
    id: Uuid,
    player_id: Uuid,
    game_id: Uuid,
    points: i32,
    comment: Option<String>,
    rating: Option<i32>,
    status: String,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    play_time_secs: Option<i64>,
}

impl PlayedGameRow {
    fn into_played_game(self) -> PlaytrackResult<PlayedGame> {
        let status = PlayedGameStatus::from_code(&self.status)
            .ok_or_else(|| PlaytrackError::Internal(format!("Invalid status: {}", self.status)))?;

        let comment = self
            .comment
            .map(BoundedText::new)
            .transpose()
            .map_err(|e| PlaytrackError::Internal(format!("Invalid comment: {}", e)))?;

        let rating = self
            .rating
            .map(Rating::new)
            .transpose()
            .map_err(|e| PlaytrackError::Internal(format!("Invalid rating: {}", e)))?;

        Ok(PlayedGame {
            id: PlayedGameId::from_uuid(self.id),
            player_id: PlayerId::from_uuid(self.player_id),
            game_id: GameId::from_uuid(self.game_id),
            points: self.points,
            comment,
            rating,
            status,
            started_at: self.started_at,
            completed_at: self.completed_at,
            play_time: self.play_time_secs.map(PlayTime::from_db).transpose()?,
        })
    }
}
