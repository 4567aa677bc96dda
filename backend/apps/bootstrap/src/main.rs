//! Playtrack Bootstrap Entry Point
//!
//! Loads configuration, prepares the database and seeds the first admin.
//! Uses `anyhow` for startup errors; domain errors stay `PlaytrackError`
//! until they cross into `kernel::error::AppError`.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use playtrack::application::{PlaytrackQueries, RegisterPlayerUseCase};
use playtrack::models::NewPlayer;
use playtrack::{AppError, PgPlaytrackRepository, PlaytrackConfig, PlaytrackError};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let env_path = env::var("ENV_PATH").unwrap_or_else(|_| "./.env".to_string());
    dotenvy::from_path(&env_path).ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bootstrap=info,playtrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(raw) => raw
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
        Err(_) => 5,
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let config = Arc::new(PlaytrackConfig::with_pepper(
        env::var("PASSWORD_PEPPER").unwrap_or_default(),
    ));
    if config.pepper().is_none() {
        tracing::warn!("PASSWORD_PEPPER not set, hashing without pepper");
    }

    let repo = Arc::new(PgPlaytrackRepository::new(pool));

    // Optional admin seed
    if let (Ok(username), Ok(password)) = (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
        let register = RegisterPlayerUseCase::new(repo.clone(), config.clone());
        let seeded = register
            .execute(NewPlayer {
                username: username.clone(),
                password,
                is_admin: true,
                ..Default::default()
            })
            .await;

        match seeded {
            Ok(player) => {
                tracing::info!(player_id = %player.id, "Admin player seeded");
            }
            Err(PlaytrackError::UsernameTaken) => {
                tracing::info!(username = %username, "Admin player already exists, skipping seed");
            }
            Err(e) => {
                let e = AppError::from(e);
                anyhow::bail!("admin seed failed: {e}");
            }
        }
    }

    let queries = PlaytrackQueries::new(repo.clone(), repo.clone(), repo);
    let board = queries.leaderboard().await.map_err(AppError::from)?;

    for (rank, entry) in board.iter().enumerate() {
        tracing::info!(
            rank = rank + 1,
            username = %entry.username,
            points = entry.points,
            completed = entry.completed,
            dropped = entry.dropped,
            rerolled = entry.rerolled,
            "Leaderboard"
        );
    }

    tracing::info!(players = board.len(), "Playtrack ready");

    Ok(())
}
