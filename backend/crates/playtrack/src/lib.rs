//! Playtrack Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, scoring rules, repository traits
//! - `application/` - Use cases and read-side queries
//! - `infra/` - In-memory and PostgreSQL repositories
//!
//! ## Features
//! - Game catalog with points derived from hours to beat
//! - Player profiles with Argon2id-hashed passwords
//! - Played-game lifecycle: `added` -> `in_progress` -> `completed` | `dropped` | `rerolled`
//! - Stacking drop penalty and a points leaderboard
//!
//! ## Consistency Model
//! - At most one non-terminal played game per player, enforced by the store
//! - A rejected update leaves the stored played game untouched

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::PlaytrackConfig;
pub use error::{PlaytrackError, PlaytrackResult};
pub use infra::memory::InMemoryPlaytrackRepository;
pub use infra::postgres::PgPlaytrackRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryPlaytrackRepository as MemoryStore;
    pub use crate::infra::postgres::PgPlaytrackRepository as PlaytrackStore;
}

#[cfg(test)]
mod tests;
