//! Value Object Module

pub mod bounded_text;
pub mod email;
pub mod play_time;
pub mod played_game_status;
pub mod player_password;
pub mod rating;
pub mod username;
pub mod web_url;

pub use bounded_text::BoundedText;
pub use email::Email;
pub use play_time::PlayTime;
pub use played_game_status::{PlayedGameStatus, TransitionError};
pub use player_password::{PlayerPassword, RawPassword};
pub use rating::Rating;
pub use username::Username;
pub use web_url::WebUrl;
