//! Application Layer
//!
//! Use cases and application services.

pub mod actor;
pub mod authenticate;
pub mod config;
pub mod create_game;
pub mod guard;
pub mod queries;
pub mod register_player;
pub mod start_played_game;
pub mod update_played_game;
pub mod update_player;

// Re-exports
pub use actor::Actor;
pub use authenticate::{AuthenticateInput, AuthenticatePlayerUseCase};
pub use config::PlaytrackConfig;
pub use create_game::CreateGameUseCase;
pub use guard::ActiveGameGuard;
pub use queries::{LeaderboardEntry, PlaytrackQueries};
pub use register_player::RegisterPlayerUseCase;
pub use start_played_game::StartPlayedGameUseCase;
pub use update_played_game::UpdatePlayedGameUseCase;
pub use update_player::UpdatePlayerUseCase;
