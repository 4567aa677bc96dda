//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the playtrack vocabulary:
//! - Typed entity identifiers shared by every layer
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//!
//! **Design Principle**: Only include things whose meaning is the same
//! for the catalog, the player profile and the played-game lifecycle.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
