//! Domain Layer
//!
//! Contains entities, value objects, scoring services, and repository traits.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{Game, PlayedGame, Player};
pub use repository::{GameRepository, PlayedGameRepository, PlayerRepository};
