//! Entity Module

pub mod game;
pub mod played_game;
pub mod player;

pub use game::{Game, NewGame};
pub use played_game::{PlayedGame, PlayedGamePatch, PlayedGameUpdate};
pub use player::{NewPlayer, Player, PlayerPatch, PlayerUpdate};
